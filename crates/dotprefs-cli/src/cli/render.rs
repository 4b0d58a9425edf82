use console::style;
use serde_json::Value;

/// Pretty JSON followed by a newline.
pub fn json(value: &Value) -> String {
    let mut out = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
    out.push('\n');
    out
}

/// One `key = value` line per entry, values as compact JSON.
pub fn entries<'a, I>(entries: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a Value)>,
{
    entries
        .into_iter()
        .map(|(key, value)| format!("{} = {}\n", style(key).bold(), value))
        .collect()
}

pub fn line(text: impl std::fmt::Display) -> String {
    format!("{}\n", text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_is_pretty_with_newline() {
        assert_eq!(json(&json!({ "a": 1 })), "{\n  \"a\": 1\n}\n");
        assert_eq!(json(&json!("bar")), "\"bar\"\n");
    }

    #[test]
    fn test_entries_lines() {
        console::set_colors_enabled(false);
        let width = json!(700);
        let foo = json!("bar");
        let out = entries(vec![("window.width", &width), ("foo", &foo)]);
        assert_eq!(out, "window.width = 700\nfoo = \"bar\"\n");
    }

    #[test]
    fn test_line() {
        assert_eq!(line(3), "3\n");
        assert_eq!(line(true), "true\n");
    }
}
