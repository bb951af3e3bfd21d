//! `nested-path` — read or edit a JSON document by path.
//!
//! Usage:
//!   nested-path <get|has|set|delete|entries> [path] [json-value] [--separator S] [--array]
//!
//! The document is read from stdin; the result is written to stdout.

use nested::cli::run;
use std::io::{self, Read, Write};

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let mut buf = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut buf) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    match run(&args, buf.trim()) {
        Ok(result) => {
            if let Err(e) = writeln!(io::stdout(), "{result}") {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
