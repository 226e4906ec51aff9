//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

fn main() {
    if let Err(err) = fuelstop_cli::run() {
        eprintln!("fuelstop: {err}");
        std::process::exit(1);
    }
}
