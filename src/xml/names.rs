//! Element-name handling.
//!
//! Mapping keys become element names verbatim by default. Keys from real
//! API payloads are usually fine (`displayNumber`, `hydra:member`), but
//! nothing guarantees it: `"2024"` or `"unit price"` would produce
//! malformed XML. Callers choose what happens through [`TagNamePolicy`].

use std::borrow::Cow;

/// What to do with element names that are not legal XML names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TagNamePolicy {
    /// Use names exactly as given. Invalid names yield malformed output.
    #[default]
    Verbatim,
    /// Replace illegal characters with `_` and prefix `_` when the first
    /// character cannot start a name. An empty name becomes `_`.
    Sanitize,
}

impl TagNamePolicy {
    pub fn apply<'a>(&self, name: &'a str) -> Cow<'a, str> {
        match self {
            TagNamePolicy::Verbatim => Cow::Borrowed(name),
            TagNamePolicy::Sanitize => sanitize_name(name),
        }
    }
}

/// Returns `true` if `name` is a legal XML 1.0 `Name`.
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if is_name_start_char(first) => chars.all(is_name_char),
        _ => false,
    }
}

/// Rewrite `name` into a legal XML name, borrowing when it already is one.
pub fn sanitize_name(name: &str) -> Cow<'_, str> {
    if is_valid_name(name) {
        return Cow::Borrowed(name);
    }

    let mut out = String::with_capacity(name.len() + 1);
    match name.chars().next() {
        None => return Cow::Owned("_".to_string()),
        Some(first) if !is_name_start_char(first) && is_name_char(first) => out.push('_'),
        _ => {}
    }
    for c in name.chars() {
        out.push(if is_name_char(c) { c } else { '_' });
    }
    Cow::Owned(out)
}

fn is_name_start_char(c: char) -> bool {
    matches!(c,
        ':' | 'A'..='Z' | '_' | 'a'..='z' |
        '\u{C0}'..='\u{D6}' | '\u{D8}'..='\u{F6}' | '\u{F8}'..='\u{2FF}' |
        '\u{370}'..='\u{37D}' | '\u{37F}'..='\u{1FFF}' |
        '\u{200C}'..='\u{200D}' | '\u{2070}'..='\u{218F}' |
        '\u{2C00}'..='\u{2FEF}' | '\u{3001}'..='\u{D7FF}' |
        '\u{F900}'..='\u{FDCF}' | '\u{FDF0}'..='\u{FFFD}' |
        '\u{10000}'..='\u{EFFFF}'
    )
}

fn is_name_char(c: char) -> bool {
    is_name_start_char(c)
        || matches!(c,
            '-' | '.' | '0'..='9' | '\u{B7}' |
            '\u{300}'..='\u{36F}' | '\u{203F}'..='\u{2040}'
        )
}
