use std::ops::Range;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::ResinError;
use crate::ResinResult;

/// Matches `templateUrl: '<path>.html'` — single quotes and the `.html`
/// suffix are mandatory, and the property name is case-sensitive.
static TEMPLATE_URL: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"templateUrl\s*:\s*'([^']+\.html)'").expect("template pattern is valid"));

/// Matches the head of a `styleUrls` declaration up to its opening bracket.
/// The bracketed list itself is handed to [`parse_style_list`] because it may
/// span multiple lines and must be validated, not just captured.
static STYLE_URLS_OPEN: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"styleUrls\s*:\s*\[").expect("style pattern is valid"));

/// An external template reference extracted from a source unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateRef {
	/// The relative path inside the quotes.
	pub path: String,
	/// Byte span of the entire `templateUrl: '...'` text.
	pub span: Range<usize>,
}

/// An external stylesheet list extracted from a source unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleList {
	/// The relative paths in declaration order.
	pub paths: Vec<String>,
	/// Byte span from the `styleUrls` keyword through the closing bracket.
	pub span: Range<usize>,
}

/// Find every `templateUrl` reference in the source, in document order.
pub fn find_template_refs(source: &str) -> Vec<TemplateRef> {
	TEMPLATE_URL
		.captures_iter(source)
		.map(|captures| {
			let whole = captures.get(0).expect("capture 0 always present");
			let path = captures.get(1).expect("path group always present");
			TemplateRef {
				path: path.as_str().to_string(),
				span: whole.range(),
			}
		})
		.collect()
}

/// Find the first `styleUrls` list in the source, if any.
///
/// The bracketed literal is parsed by an explicit micro-parser that accepts
/// only single-quoted path strings, commas, and whitespace. Anything else —
/// identifiers, template strings, nested arrays — is rejected with
/// [`ResinError::MalformedStyleList`] rather than silently misparsed. Only
/// the first occurrence per file is considered: a component declares at most
/// one style list.
pub fn find_style_list(source: &str, origin: &Path) -> ResinResult<Option<StyleList>> {
	let Some(open) = STYLE_URLS_OPEN.find(source) else {
		return Ok(None);
	};

	let (paths, end) = parse_style_list(source, open.end(), origin)?;
	Ok(Some(StyleList {
		paths,
		span: open.start()..end,
	}))
}

/// Parse the interior of a style list starting just after the opening
/// bracket. Returns the extracted paths and the byte offset one past the
/// closing bracket.
fn parse_style_list(source: &str, start: usize, origin: &Path) -> ResinResult<(Vec<String>, usize)> {
	let malformed = |reason: String| ResinError::MalformedStyleList {
		file: origin.display().to_string(),
		reason,
	};

	let mut paths = Vec::new();
	let mut chars = source[start..].char_indices();
	let mut expect_separator = false;

	while let Some((offset, ch)) = chars.next() {
		match ch {
			c if c.is_whitespace() => {}
			']' => return Ok((paths, start + offset + 1)),
			',' => expect_separator = false,
			'\'' => {
				if expect_separator {
					return Err(malformed("missing comma between entries".to_string()));
				}
				let mut path = String::new();
				loop {
					match chars.next() {
						Some((_, '\'')) => break,
						Some((_, c)) => path.push(c),
						None => {
							return Err(malformed("unterminated string".to_string()));
						}
					}
				}
				paths.push(path);
				expect_separator = true;
			}
			other => {
				return Err(malformed(format!(
					"unexpected character `{other}` (only single-quoted paths, commas, and \
					 whitespace are allowed)"
				)));
			}
		}
	}

	Err(malformed("missing closing bracket".to_string()))
}
