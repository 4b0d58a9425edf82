use clap::{Parser, Subcommand};
use dotprefs::paths::DEFAULT_APP_NAME;
use dotprefs::DEFAULT_FILE_NAME;
use serde_json::Value;
use std::path::PathBuf;
use std::sync::OnceLock;

/// Returns the version string, with the git hash appended for non-release builds.
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("DOTPREFS_GIT_HASH");
    const IS_RELEASE: &str = env!("DOTPREFS_IS_RELEASE");

    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            format!("v{}", VERSION)
        } else {
            format!("v{} (dev: {})", VERSION, GIT_HASH)
        }
    })
}

#[derive(Parser, Debug)]
#[command(
    name = "dotprefs",
    bin_name = "dotprefs",
    version = get_version(),
    disable_help_subcommand = true
)]
#[command(about = "Inspect and edit dot-path preference files", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding the preferences file [default: the app's user data dir]
    #[arg(short, long, global = true, env = "DOTPREFS_DIR", help_heading = "Options")]
    pub dir: Option<PathBuf>,

    /// Application whose user data directory holds the file
    #[arg(short, long, global = true, default_value = DEFAULT_APP_NAME, help_heading = "Options")]
    pub app: String,

    /// Name of the preferences file
    #[arg(short, long, global = true, default_value = DEFAULT_FILE_NAME, help_heading = "Options")]
    pub file_name: String,

    /// Defaults as a JSON object; persisted values take precedence
    #[arg(long, global = true, value_parser = parse_json_object, help_heading = "Options")]
    pub defaults: Option<Value>,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Print a value as JSON; without a key, print the whole tree
    Get { key: Option<String> },

    /// Store a value (parsed as JSON, otherwise taken as a string)
    Set { key: String, value: String },

    /// Remove a key and everything below it
    #[command(alias = "rm")]
    Delete { key: String },

    /// Print whether a key resolves to a value
    Has { key: String },

    /// List stored entries in insertion order
    #[command(alias = "ls")]
    List {
        /// Print a flat JSON object instead of `key = value` lines
        #[arg(long)]
        json: bool,
    },

    /// Remove every entry
    Clear,

    /// Print the number of stored entries
    Size,

    /// Print the path of the preferences file
    Path,
}

fn parse_json_object(raw: &str) -> Result<Value, String> {
    match serde_json::from_str::<Value>(raw) {
        Ok(value @ Value::Object(_)) => Ok(value),
        Ok(_) => Err("defaults must be a JSON object".to_string()),
        Err(e) => Err(format!("invalid JSON: {e}")),
    }
}

/// Parses a command-line value: JSON when it parses, a plain string otherwise.
pub fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

pub fn parse_cli() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_value("700"), json!(700));
        assert_eq!(parse_value("true"), json!(true));
        assert_eq!(parse_value("{\"a\": 1}"), json!({ "a": 1 }));
        assert_eq!(parse_value("\"quoted\""), json!("quoted"));
        assert_eq!(parse_value("dark"), json!("dark"));
        assert_eq!(parse_value(""), json!(""));
    }

    #[test]
    fn test_parse_set_command() {
        let cli = Cli::try_parse_from(["dotprefs", "--dir", "/tmp/p", "set", "window.width", "700"])
            .unwrap();
        assert_eq!(
            cli.command,
            Commands::Set {
                key: "window.width".to_string(),
                value: "700".to_string()
            }
        );
        assert_eq!(cli.dir, Some(PathBuf::from("/tmp/p")));
        assert_eq!(cli.file_name, "prefs");
        assert_eq!(cli.app, "dotprefs");
    }

    #[test]
    fn test_parse_aliases_and_global_flags() {
        let cli = Cli::try_parse_from(["dotprefs", "ls", "--json", "-f", "config.js"]).unwrap();
        assert_eq!(cli.command, Commands::List { json: true });
        assert_eq!(cli.file_name, "config.js");

        let cli = Cli::try_parse_from(["dotprefs", "rm", "foo"]).unwrap();
        assert_eq!(cli.command, Commands::Delete { key: "foo".to_string() });
    }

    #[test]
    fn test_parse_defaults_must_be_object() {
        let cli =
            Cli::try_parse_from(["dotprefs", "--defaults", "{\"window\":{\"width\":600}}", "get"])
                .unwrap();
        assert_eq!(cli.defaults, Some(json!({ "window": { "width": 600 } })));
        assert_eq!(cli.command, Commands::Get { key: None });

        assert!(Cli::try_parse_from(["dotprefs", "--defaults", "[1]", "get"]).is_err());
        assert!(Cli::try_parse_from(["dotprefs", "--defaults", "{", "get"]).is_err());
    }
}
