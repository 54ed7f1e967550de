use std::path::Path;
use std::path::PathBuf;
use std::sync::LazyLock;

use regex::Regex;

use crate::ResinError;
use crate::ResinResult;

/// Matches the head of an `@import`/`@use`/`@forward` path that opts into
/// package-root resolution with a leading `~`.
static TILDE_IMPORT: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r#"(@(?:import|use|forward)\s+["'])~"#).expect("tilde-import pattern is valid")
});

/// Compiles CSS-superset stylesheets down to plain CSS before inlining.
///
/// `.scss` and `.sass` sources go through the `grass` compiler; any other
/// extension passes through untouched. Imports prefixed with `~` resolve
/// against the package root instead of the referencing stylesheet's
/// directory, matching the packaging convention of the component sources
/// this tool rewrites.
///
/// Each render call is independent and reentrant — the renderer holds no
/// compiler state between invocations.
#[derive(Debug, Clone)]
pub struct StyleRenderer {
	package_root: PathBuf,
}

impl StyleRenderer {
	pub fn new(package_root: impl Into<PathBuf>) -> Self {
		Self {
			package_root: package_root.into(),
		}
	}

	/// Render raw stylesheet text to plain CSS.
	///
	/// `path` identifies the stylesheet on disk; its extension selects the
	/// compiler syntax and its parent directory anchors relative imports.
	/// Compiler failures (syntax errors, unresolvable imports) surface as
	/// [`ResinError::StyleCompile`] — never as a silent pass-through.
	pub fn render(&self, raw: &str, path: &Path) -> ResinResult<String> {
		if !is_superset_stylesheet(path) {
			return Ok(raw.to_string());
		}

		let rewritten = TILDE_IMPORT.replace_all(raw, "$1");

		let mut options = grass::Options::default()
			.style(grass::OutputStyle::Expanded)
			.quiet(true);
		if let Some(parent) = path.parent() {
			options = options.load_path(parent);
		}
		options = options.load_path(&self.package_root);
		if path.extension().is_some_and(|ext| ext == "sass") {
			options = options.input_syntax(grass::InputSyntax::Sass);
		}

		grass::from_string(rewritten.into_owned(), &options).map_err(|error| {
			ResinError::StyleCompile {
				path: path.display().to_string(),
				reason: error.to_string(),
			}
		})
	}
}

/// Check whether a stylesheet's extension denotes the CSS-superset language.
pub fn is_superset_stylesheet(path: &Path) -> bool {
	path.extension()
		.and_then(|ext| ext.to_str())
		.is_some_and(|ext| matches!(ext, "scss" | "sass"))
}
