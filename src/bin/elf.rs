extern crate elf_lang;

use clap::Parser as ClapParser;
use log::{debug, error};

#[derive(ClapParser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Source file to run.
    file: std::path::PathBuf,
}

fn main() {
    simple_logger::init_with_level(log::Level::Warn).unwrap();
    let args = Cli::parse();

    let source = match std::fs::read_to_string(&args.file) {
        Ok(source) => source,
        Err(io_error) => {
            error!(
                "could not read file '{}': {io_error}",
                args.file.to_string_lossy()
            );
            std::process::exit(1);
        }
    };

    debug!("evaluating '{}'", args.file.to_string_lossy());
    println!("{}", elf_lang::evaluate_program(&source));
}
