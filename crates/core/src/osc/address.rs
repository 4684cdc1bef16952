//! OSC address pattern validation.
//!
//! Addresses entered by the operator are restricted to a small character set.
//! Space and both quote marks are allowed on purpose: quoted string arguments
//! are carved out later by the message parser, not here.

fn is_allowed_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '/' | '_' | '-' | '.' | ':' | ' ' | '"' | '\'')
}

/// Returns true if every character of `input` is in the allowed set.
pub fn is_valid_address(input: &str) -> bool {
    input.chars().all(is_allowed_char)
}

/// Strips every disallowed character from `input`, preserving the order of
/// the characters that remain. Valid input comes back unchanged.
pub fn sanitize_address(input: &str) -> String {
    if is_valid_address(input) {
        return input.to_string();
    }
    input.chars().filter(|c| is_allowed_char(*c)).collect()
}
