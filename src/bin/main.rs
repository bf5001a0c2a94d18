use skarn::interpreter::Interpreter;
use std::{
    env,
    io::{self, Write},
    process,
};

fn main() -> io::Result<()> {
    let args: Vec<String> = env::args().collect();
    match args.len() {
        1 => run_prompt(),
        2 => run_file(args[1].as_str()),
        _ => {
            writeln!(io::stdout(), "Usage: skarn [script]")?;
            process::exit(64);
        },
    }
}

fn run_file(path: &str) -> io::Result<()> {
    let source = std::fs::read_to_string(path)?;
    let mut interpreter = Interpreter::new();

    match interpreter.interpret(path, source.as_str()) {
        Ok(result) => {
            if !result.is_empty() {
                writeln!(io::stdout(), "{}", result)?;
            }
            Ok(())
        },
        Err(e) => {
            writeln!(io::stderr(), "{}", e)?;
            process::exit(if e.is_runtime_error() { 70 } else { 65 });
        },
    }
}

fn run_prompt() -> io::Result<()> {
    let mut buffer = String::new();
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut stderr = io::stderr();
    let mut interpreter = Interpreter::new();

    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;

        buffer.clear();

        let num_bytes = stdin.read_line(&mut buffer)?;
        if num_bytes == 0 {
            break;
        }

        match interpreter.interpret("stdin", buffer.as_str()) {
            Ok(result) => {
                if !result.is_empty() {
                    writeln!(stdout, "{}", result)?;
                }
            },
            Err(e) => writeln!(stderr, "{}", e)?,
        }
    }

    Ok(())
}
