//! CSV Reader Example
//!
//! Reads every record from a CSV file given on the command line (or a small
//! built-in sample) and prints it. Pass `--verbose` to see the reader's
//! debug and trace log.

use csvstream::{CsvError, CsvReader};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use std::error::Error;

const SAMPLE: &str = "from,to,num,msg\n\
Alice,Bob,1,\"Hello!\"\n\
Alice,Bob,3,\"do you like newlines?\nlike this?\"\n\
Bob,Alice,4,\"Nope.\"";

fn main() -> Result<(), Box<dyn Error>> {
    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let verbose = args.iter().any(|a| a == "--verbose");
    args.retain(|a| a != "--verbose");

    let level = if verbose {
        LevelFilter::Trace
    } else {
        LevelFilter::Info
    };
    TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )?;

    let mut reader = match args.first() {
        Some(path) => CsvReader::open(path)?,
        None => CsvReader::from_text(SAMPLE),
    };

    let mut count = 0;
    loop {
        match reader.next_record() {
            Ok(Some(record)) => {
                count += 1;
                println!("{:?}", record.into_inner());
            }
            Ok(None) => break,
            Err(CsvError::MalformedInput { kind, position }) => {
                log::error!("stopped at {}: {}", position, kind);
                break;
            }
            Err(e) => return Err(e.into()),
        }
    }

    println!("Records read: {}", count);
    Ok(())
}
