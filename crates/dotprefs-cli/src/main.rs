//! # dotprefs CLI
//!
//! A thin terminal client for `dotprefs` preference files. All store logic
//! lives in the `dotprefs` library; this binary parses arguments, opens the
//! store, dispatches one command and prints the result.
//!
//! ```text
//! dotprefs --app my-editor get window
//! dotprefs --dir ./settings set window.width 700
//! dotprefs list --json
//! ```

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
