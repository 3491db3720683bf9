//! Directory-name parsing for the `NN_name` ordering convention.
//!
//! Every level of the content tree (units, lessons, tabs, cards) is a
//! directory whose name doubles as its display title. Authors order siblings
//! with an optional numeric prefix followed by `_` or `-`; words are joined
//! with underscores:
//!
//! - `03_declaration_of_independence/` → "Declaration Of Independence"
//! - `1-reconstruction/` → "Reconstruction"
//! - `intro/` → "Intro"
//!
//! A digit run that is not followed by a separator is part of the name:
//! `2023meeting` stays `2023meeting`.

/// Result of splitting a directory name into ordering prefix and name.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedName<'a> {
    /// Digits of the ordering prefix, if present (`"03"` from `03_intro`)
    pub prefix: Option<&'a str>,
    /// Remainder after the prefix separator. The full input when unprefixed.
    pub name: &'a str,
}

/// Split off a leading `<digits><_ or ->` prefix.
///
/// - `"03_intro"` → prefix=Some("03"), name="intro"
/// - `"12-the_war"` → prefix=Some("12"), name="the_war"
/// - `"01_"` → prefix=Some("01"), name=""
/// - `"2023meeting"` → prefix=None, name="2023meeting"
/// - `"_intro"` → prefix=None, name="_intro"
pub fn parse_entry_name(name: &str) -> ParsedName<'_> {
    let digits = name.bytes().take_while(u8::is_ascii_digit).count();
    if digits > 0 && matches!(name.as_bytes().get(digits), Some(b'_' | b'-')) {
        return ParsedName {
            prefix: Some(&name[..digits]),
            name: &name[digits + 1..],
        };
    }
    ParsedName { prefix: None, name }
}

/// Derive a human-readable title from a directory name.
///
/// Strips the ordering prefix, turns underscores into spaces, and uppercases
/// the first character of each word. The rest of each word is left as-is, so
/// `"USA_and_the_world"` becomes `"USA And The World"`.
pub fn derive_title(name: &str) -> String {
    parse_entry_name(name)
        .name
        .replace('_', " ")
        .split(' ')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Space-substituted name used for document headings: `"the_new_deal"` →
/// `"the new deal"`. No prefix stripping, no capitalization.
pub fn heading_name(name: &str) -> String {
    name.replace('_', " ")
}
