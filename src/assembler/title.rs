use std::sync::LazyLock;

use regex::Regex;

use crate::error::{AssembleError, Result};

/// Characters stripped from the front of a file name (ordering prefix like `01_`).
const PREFIX_LEN: usize = 3;
/// Characters stripped from the end of a file name (`.md`).
const SUFFIX_LEN: usize = 3;

static CONVENTION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{2}_.+\.md$").unwrap());

/// `01_hello_world.md` → `Hello world`.
///
/// Slicing is by characters. Names of six characters or fewer give an empty
/// title; only the first character is uppercased.
pub fn derive_title(file_name: &str) -> String {
    let chars: Vec<char> = file_name.chars().collect();
    if chars.len() <= PREFIX_LEN + SUFFIX_LEN {
        return String::new();
    }
    let stem: String = chars[PREFIX_LEN..chars.len() - SUFFIX_LEN].iter().collect();
    capitalize_first(&stem.replace('_', " "))
}

/// Heading anchor as markdown renderers assign it: lowercase, spaces → `-`.
pub fn anchor(title: &str) -> String {
    title.to_lowercase().replace(' ', "-")
}

/// Reject names that don't carry a two-digit ordering prefix and `.md` extension.
pub fn validate_name(file_name: &str) -> Result<()> {
    if CONVENTION_RE.is_match(file_name) {
        Ok(())
    } else {
        Err(AssembleError::MalformedName {
            name: file_name.to_string(),
        })
    }
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
