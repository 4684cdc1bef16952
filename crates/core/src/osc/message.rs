//! Cue string parsing.
//!
//! A cue message is a free-form string like `/cue/1 "hello world" 42`:
//! the address pattern runs up to the first space, the rest is tokenized
//! into arguments with shell-like double-quote grouping.

/// A single typed OSC argument.
///
/// Cue strings only ever produce string arguments today; numeric and boolean
/// variants can be added once the parser learns to produce them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OscArg {
    String(String),
}

impl OscArg {
    /// The OSC type tag character for this argument.
    pub fn type_tag(&self) -> char {
        match self {
            OscArg::String(_) => 's',
        }
    }
}

/// The result of parsing one cue string. Built fresh for every send and
/// discarded afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedMessage {
    pub addr: String,
    pub args: Vec<OscArg>,
}

/// Replaces typographic quotes with their straight ASCII equivalents.
///
/// Text pasted from word processors and some on-screen keyboards arrives with
/// curly quotes; the quoting rules below are defined over straight quotes.
pub fn normalize_quotes(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{2018}' | '\u{2019}' => '\'',
            '\u{201C}' | '\u{201D}' => '"',
            other => other,
        })
        .collect()
}

/// Splits a raw cue string into an address pattern and its arguments.
///
/// The input is split on the first space only. Everything after it is
/// tokenized left to right: a double-quoted run is one token with the quotes
/// stripped, otherwise a maximal run of non-whitespace characters is one
/// token. Parsing never fails; a string without a space is an address with
/// no arguments.
pub fn parse_message(raw: &str) -> ParsedMessage {
    let normalized = normalize_quotes(raw);
    match normalized.split_once(' ') {
        None => ParsedMessage {
            addr: normalized,
            args: Vec::new(),
        },
        Some((head, rest)) => ParsedMessage {
            addr: head.to_string(),
            args: tokenize(rest),
        },
    }
}

// An interior `"` ends a quoted run early and there is no escape sequence.
// Persisted cues rely on this exact tokenization, so it stays as-is.
fn tokenize(input: &str) -> Vec<OscArg> {
    let chars: Vec<char> = input.chars().collect();
    let mut args = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        if chars[i].is_whitespace() {
            i += 1;
            continue;
        }

        if chars[i] == '"' {
            if let Some(close) = chars[i + 1..].iter().position(|&c| c == '"') {
                args.push(OscArg::String(chars[i + 1..i + 1 + close].iter().collect()));
                i += close + 2;
                continue;
            }
            // No closing quote: fall through and treat the `"` as part of a
            // plain token, matching the original tokenizer.
        }

        let start = i;
        while i < chars.len() && !chars[i].is_whitespace() {
            i += 1;
        }
        args.push(OscArg::String(chars[start..i].iter().collect()));
    }

    args
}
