//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

fn main() {
    if let Err(err) = firstcar_cli::run() {
        eprintln!("firstcar: {err}");
        std::process::exit(1);
    }
}
