use std::sync::LazyLock;

use regex::Regex;

/// Matches a maximal run of line breaks together with any whitespace that
/// follows them, so indentation after a newline collapses with the newline
/// itself.
static LINE_BREAK_RUNS: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"[\r\n]\s*").expect("line-break pattern is valid"));

/// Flatten a text blob into a form that embeds safely inside a single-line
/// quoted string literal.
///
/// Every maximal run of line breaks (plus trailing indentation) becomes a
/// single space, and every unescaped double quote gains a backslash. The
/// function is idempotent: normalizing already-normalized text is a no-op,
/// which keeps the whole pipeline safe to re-run on its own output.
pub fn normalize(text: &str) -> String {
	escape_quotes(&LINE_BREAK_RUNS.replace_all(text, " "))
}

/// Escape double quotes that are not already escaped. Escaping
/// unconditionally would double up backslashes on a second pass and break
/// idempotence.
fn escape_quotes(text: &str) -> String {
	let mut escaped = String::with_capacity(text.len());
	let mut previous = None;
	for ch in text.chars() {
		if ch == '"' && previous != Some('\\') {
			escaped.push('\\');
		}
		escaped.push(ch);
		previous = Some(ch);
	}
	escaped
}
