//! Crude parsers for psql failure text.
//!
//! Only three families count as evidence of invalidity. Everything else
//! (most commonly "relation does not exist", since the scratch database is
//! empty) stays `Unknown`; finer distinctions such as
//! `ERROR:  invalid input syntax` are left to queries over the corpus.

use sqloracle_core::types::Verdict;

const INVALID_COMMAND: &str = "invalid command";
const UNRECOGNIZED_VALUE: &str = "unrecognized value";
const ERROR_PREFIX: &str = "ERROR:";
const SYNTAX_ERROR: &str = "syntax error";

/// Which known-bad pattern matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidityEvidence {
    /// Unknown backslash meta-command, e.g. `invalid command \xyz`.
    InvalidMetaCommand,
    /// Bad value for a meta-command option, e.g. `\pset format bogus`.
    UnrecognizedOptionValue,
    /// Server-side `ERROR:  syntax error ...`.
    SyntaxError,
}

/// Match `failure_text` against the known-bad families, in priority order.
/// Meta-command failures come first: psql reports them before it ever
/// resolves database objects.
pub fn detect_invalidity(failure_text: &str) -> Option<InvalidityEvidence> {
    let text = strip_location_tag(failure_text.trim_start());
    if text.starts_with(INVALID_COMMAND) {
        return Some(InvalidityEvidence::InvalidMetaCommand);
    }
    if text.starts_with(UNRECOGNIZED_VALUE) {
        return Some(InvalidityEvidence::UnrecognizedOptionValue);
    }
    if let Some(rest) = text.strip_prefix(ERROR_PREFIX) {
        if rest.trim_start_matches([' ', '\t']).starts_with(SYNTAX_ERROR) {
            return Some(InvalidityEvidence::SyntaxError);
        }
    }
    None
}

pub fn classify_failure(failure_text: &str) -> Verdict {
    match detect_invalidity(failure_text) {
        Some(_) => Verdict::Invalid,
        None => Verdict::Unknown,
    }
}

/// psql prefixes diagnostics for piped input with `psql:<source>:<line>: `.
/// Strip it so the prefix match sees the diagnostic itself.
fn strip_location_tag(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("psql:") else {
        return text;
    };
    for (colon, _) in rest.match_indices(':') {
        let after = &rest[colon + 1..];
        let digits = after.bytes().take_while(u8::is_ascii_digit).count();
        if digits > 0 {
            if let Some(diagnostic) = after[digits..].strip_prefix(": ") {
                return diagnostic;
            }
        }
    }
    text
}
