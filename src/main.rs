use std::fs;

use clap::Parser;
use curio::run;

/// curio is an easy to use, expression-oriented programming language with
/// curried functions and classes.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells curio to look at a file instead of a script.
    #[arg(short, long)]
    file: bool,

    /// Quiet mode suppresses printing the final value of a script.
    #[arg(short, long)]
    quiet: bool,

    contents: String,
}

fn main() {
    let args = Args::parse();

    let script = if args.file {
        fs::read_to_string(&args.contents).unwrap_or_else(|_| {
            eprintln!(
                "Failed to read the input file '{}'. Perhaps this file does not exist?",
                &args.contents
            );
            std::process::exit(1);
        })
    } else {
        args.contents
    };

    match run(&script) {
        Ok(Some(value)) if !args.quiet => println!("{value}"),
        Ok(_) => {}
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
