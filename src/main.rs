use clap::Parser;
use pairswitch::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
