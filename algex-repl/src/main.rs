mod command;
mod error;
mod session;

use rustyline::{error::ReadlineError, DefaultEditor};
use session::Session;
use std::{fs::File, io::{self, BufReader, IsTerminal, Read}};

/// Handles one line of input, printing the output or the error.
fn handle_line(line: &str, session: &mut Session) {
    if line.trim().is_empty() {
        return;
    }

    match session.handle(line) {
        Ok(output) if output.is_empty() => (),
        Ok(output) => println!("{}", output),
        Err(err) => err.report_to_stderr(),
    }
}

/// Handles every line of the given input, in order.
fn execute(input: &str) {
    let mut session = Session::new();
    for line in input.lines() {
        handle_line(line, &mut session);
    }
}

/// Reads the whole input from the given reader.
fn read_all(mut reader: impl Read) -> io::Result<String> {
    let mut input = String::new();
    reader.read_to_string(&mut input)?;
    Ok(input)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    let mut args = std::env::args();
    args.next();

    if let Some(filename) = args.next() {
        // run source file
        match File::open(&filename).and_then(|file| read_all(BufReader::new(file))) {
            Ok(input) => execute(&input),
            Err(err) => eprintln!("cannot read `{}`: {}", filename, err),
        }
    } else if !io::stdin().is_terminal() {
        // read source from stdin
        match read_all(io::stdin()) {
            Ok(input) => execute(&input),
            Err(err) => eprintln!("cannot read stdin: {}", err),
        }
    } else {
        // run the repl / interactive mode
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(err) => {
                eprintln!("{}", err);
                return;
            },
        };
        let mut session = Session::new();

        fn process_line(rl: &mut DefaultEditor, session: &mut Session) -> Result<(), ReadlineError> {
            let input = rl.readline("> ")?;
            if input.trim().is_empty() {
                return Ok(());
            }

            rl.add_history_entry(&input)?;

            handle_line(&input, session);
            Ok(())
        }

        loop {
            if let Err(err) = process_line(&mut rl, &mut session) {
                match err {
                    ReadlineError::Eof | ReadlineError::Interrupted => (),
                    _ => eprintln!("{}", err),
                }
                break;
            }
        }
    }
}
