//! Identifier rules shared by parameter, node and network names

use thiserror::Error;

/// Maximum length for any name (30 chars)
pub const MAX_NAME_LEN: usize = 30;

/// Words that can never be used as a name
pub const RESERVED_WORDS: [&str; 3] = ["node", "root", "network"];

/// Reason a name was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidName {
    #[error("names cannot be empty")]
    Empty,

    #[error("name \"{name}\" is too long: {len} chars (max {max})")]
    TooLong { name: String, len: usize, max: usize },

    #[error("name \"{0}\" cannot start with a digit")]
    LeadingDigit(String),

    #[error("name \"{0}\" cannot start with double underscores")]
    ReservedPrefix(String),

    #[error("name \"{0}\" is a reserved word")]
    ReservedWord(String),

    #[error("name \"{name}\" contains invalid character '{found}'")]
    InvalidCharacter { name: String, found: char },

    #[error("name \"{0}\" is already in use")]
    Duplicate(String),
}

/// Validate a parameter, node or network name.
///
/// Rules are checked in order and the first failure is reported. Uppercase
/// letters are accepted as-is.
pub fn validate(name: &str) -> Result<(), InvalidName> {
    if name.is_empty() {
        return Err(InvalidName::Empty);
    }
    let len = name.chars().count();
    if len > MAX_NAME_LEN {
        return Err(InvalidName::TooLong {
            name: name.to_string(),
            len,
            max: MAX_NAME_LEN,
        });
    }
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        return Err(InvalidName::LeadingDigit(name.to_string()));
    }
    if name.starts_with("__") {
        return Err(InvalidName::ReservedPrefix(name.to_string()));
    }
    if RESERVED_WORDS.contains(&name) {
        return Err(InvalidName::ReservedWord(name.to_string()));
    }
    if let Some(found) = name
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '_'))
    {
        return Err(InvalidName::InvalidCharacter {
            name: name.to_string(),
            found,
        });
    }
    Ok(())
}

/// Check whether a name passes [`validate`]
pub fn is_valid(name: &str) -> bool {
    validate(name).is_ok()
}

/// Turn an identifier into a display label: `line_width` becomes `Line Width`
pub fn display_label(name: &str) -> String {
    name.split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
