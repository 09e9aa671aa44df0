//! Entry point for the `routewise` command-line interface.
#![forbid(unsafe_code)]

#[expect(
    clippy::print_stderr,
    reason = "the binary reports fatal errors on stderr before exiting"
)]
fn main() {
    if let Err(err) = routewise_cli::run() {
        eprintln!("routewise: {err}");
        std::process::exit(1);
    }
}
