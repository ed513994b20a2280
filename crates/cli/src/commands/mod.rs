//! Command implementations.

use std::io::Write;

use serde::Serialize;

pub mod plan;
pub mod store;

/// Parse a `key=value` field argument.
///
/// The value may be empty (`name=`), which clears that translation.
pub fn parse_field(arg: &str) -> Result<(String, String), String> {
    let (key, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got `{arg}`"))?;

    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing field key in `{arg}`"));
    }

    Ok((key.to_owned(), value.to_owned()))
}

/// Write `value` to stdout as pretty JSON.
fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parses_key_value() {
        assert_eq!(
            parse_field("name=Produit").unwrap(),
            ("name".to_owned(), "Produit".to_owned())
        );
    }

    #[test]
    fn keeps_equals_in_value_and_allows_empty() {
        assert_eq!(
            parse_field("description=a=b").unwrap(),
            ("description".to_owned(), "a=b".to_owned())
        );
        assert_eq!(
            parse_field("page_title=").unwrap(),
            ("page_title".to_owned(), String::new())
        );
    }

    #[test]
    fn rejects_missing_separator_or_key() {
        assert!(parse_field("name").is_err());
        assert!(parse_field("=value").is_err());
    }
}
