//! Username and password from a `.properties` file.
//!
//! Accepts the common subset of the Java properties format: `key=value`,
//! `key: value` and `key value` lines, `#` and `!` comment lines, blank
//! lines. Values are trimmed. Line continuations and escapes are not
//! supported.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum CredentialsError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No username specified!")]
    MissingUsername,

    #[error("No password specified!")]
    MissingPassword,
}

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    pub fn load(path: &Path) -> Result<Self, CredentialsError> {
        let text = std::fs::read_to_string(path).map_err(|source| CredentialsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded credentials file");
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self, CredentialsError> {
        let mut props = parse_properties(text);
        let username = props
            .remove("username")
            .ok_or(CredentialsError::MissingUsername)?;
        let password = props
            .remove("password")
            .ok_or(CredentialsError::MissingPassword)?;
        Ok(Self { username, password })
    }
}

fn parse_properties(text: &str) -> HashMap<String, String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#') && !line.starts_with('!'))
        .map(split_property)
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

/// The key ends at the first `=`, `:` or whitespace. A whitespace
/// separator may still be followed by one `=` or `:`.
fn split_property(line: &str) -> (&str, &str) {
    let Some(split) = line.find(|c: char| c == '=' || c == ':' || c.is_whitespace()) else {
        return (line, "");
    };
    let (key, rest) = line.split_at(split);
    let mut chars = rest.chars();
    let separator = chars.next().unwrap_or_default();
    let mut value = chars.as_str().trim_start();
    if separator.is_whitespace() {
        value = value
            .strip_prefix(|c: char| c == '=' || c == ':')
            .unwrap_or(value);
    }
    (key, value.trim())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn parses_both_separators_and_trims() {
        let text = "# BOOST account\nusername = alice \npassword: s3cret=1\n";
        let creds = Credentials::parse(text).unwrap();
        assert_eq!(creds.username, "alice");
        assert_eq!(creds.password, "s3cret=1");
    }

    #[test]
    fn whitespace_separates_key_and_value() {
        let creds = Credentials::parse("username alice\npassword\tpw = x\n").unwrap();
        assert_eq!(creds.username, "alice");
        assert_eq!(creds.password, "pw = x");
    }

    #[test]
    fn separator_after_whitespace_is_skipped() {
        let creds = Credentials::parse("username   = alice\npassword  :s3cret\n").unwrap();
        assert_eq!(creds.username, "alice");
        assert_eq!(creds.password, "s3cret");
    }

    #[test]
    fn key_without_value_is_empty() {
        let creds = Credentials::parse("username\npassword=pw\n").unwrap();
        assert_eq!(creds.username, "");
    }

    #[test]
    fn ignores_comments_and_unrelated_keys() {
        let text = "! legacy comment\n\nurl=https://example.org\nusername=bob\npassword=pw\n";
        let creds = Credentials::parse(text).unwrap();
        assert_eq!(creds.username, "bob");
    }

    #[test]
    fn missing_username() {
        let err = Credentials::parse("password=pw\n").unwrap_err();
        assert!(matches!(err, CredentialsError::MissingUsername));
        assert_eq!(err.to_string(), "No username specified!");
    }

    #[test]
    fn missing_password() {
        let err = Credentials::parse("username=bob\n#password=pw\n").unwrap_err();
        assert!(matches!(err, CredentialsError::MissingPassword));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "username=carol\npassword=hunter2").unwrap();
        let creds = Credentials::load(file.path()).unwrap();
        assert_eq!(creds.username, "carol");
        assert_eq!(creds.password, "hunter2");
        assert!(!format!("{creds:?}").contains("hunter2"));
    }

    #[test]
    fn load_missing_file() {
        let err = Credentials::load(Path::new("/no/such/boost.properties")).unwrap_err();
        assert!(matches!(err, CredentialsError::Read { .. }));
    }
}
