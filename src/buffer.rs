use crate::{
    error::{Error, Result},
    token::Token,
};

const CAPACITY: usize = 2;

// Fixed-size lookahead window between the scanner and the parser. Tokens
// are pulled from the underlying iterator lazily, in source order, and
// each token is pulled at most once.
pub struct TokenBuffer<T> {
    tokens: T,
    slots: [Option<Token>; CAPACITY],
    position: usize,
}

impl <T: Iterator<Item = Result<Token>>> TokenBuffer<T> {
    pub fn new(tokens: T) -> Self {
        TokenBuffer {
            tokens,
            slots: [None, None],
            position: 0,
        }
    }

    // Peeks n tokens past the head without consuming anything. Asking for
    // more lookahead than the buffer holds is a programming error, not an
    // input error.
    pub fn look_ahead(&mut self, n: usize) -> Result<&Token> {
        if n >= CAPACITY {
            panic!("token buffer overflow");
        }

        self.load(n)?;
        match &self.slots[(self.position + n) % CAPACITY] {
            Some(token) => Ok(token),
            None => Err(Error::unexpected()),
        }
    }

    pub fn consume(&mut self) -> Result<Token> {
        self.load(0)?;
        match self.slots[self.position].take() {
            Some(token) => {
                self.position = (self.position + 1) % CAPACITY;
                Ok(token)
            },
            None => Err(Error::unexpected()),
        }
    }

    fn load(&mut self, n: usize) -> Result<()> {
        for i in 0..=n {
            let slot = (self.position + i) % CAPACITY;
            if self.slots[slot].is_none() {
                self.slots[slot] = Some(self.pull()?);
            }
        }
        Ok(())
    }

    fn pull(&mut self) -> Result<Token> {
        self.tokens.next().ok_or_else(Error::unexpected)?
    }
}
