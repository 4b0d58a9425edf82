//! # CLI Layer
//!
//! The only place that knows about terminal I/O, exit codes and output
//! formatting.
//!
//! ## Locating the File
//!
//! The preferences file is `<dir>/<file-name>`:
//! - `--dir` (or `DOTPREFS_DIR`) sets the directory explicitly.
//! - Otherwise the user data directory of `--app` is used (see
//!   [`dotprefs::UserDataDir`]).
//!
//! `--defaults '{"window": {"width": 600}}'` supplies the defaults the
//! application would pass, so `get` shows what the application sees.
//!
//! ## Values
//!
//! `set` parses its value as JSON (`700`, `true`, `{"a": 1}`) and falls back
//! to a plain string when that fails, so `dotprefs set theme dark` works
//! without quoting.
//!
//! ## Module Structure
//!
//! - `setup`: argument parsing via clap
//! - `commands`: context wiring and dispatch
//! - `render`: output formatting

mod commands;
mod render;
pub mod setup;

pub use commands::run;
