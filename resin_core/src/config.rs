use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::ResinError;
use crate::ResinResult;

/// Default maximum file size in bytes (10 MB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Default glob for candidate source files when `[include]` is not
/// configured.
pub const DEFAULT_INCLUDE_PATTERN: &str = "**/*.ts";

/// Default directory the `~` import prefix resolves against.
pub const DEFAULT_PACKAGE_ROOT: &str = "node_modules";

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] = ["resin.toml", ".resin.toml", ".config/resin.toml"];

/// Configuration loaded from a `resin.toml` file.
///
/// ```toml
/// [include]
/// patterns = ["src/**/*.ts"]
///
/// [exclude]
/// patterns = ["vendor/", "*.spec.ts"]
///
/// package_root = "node_modules"
/// max_file_size = 1048576
/// disable_gitignore = false
/// ```
#[derive(Debug, Deserialize)]
pub struct ResinConfig {
	/// Inclusion configuration — glob patterns selecting candidate source
	/// files. Defaults to `**/*.ts` when absent.
	#[serde(default)]
	pub include: IncludeConfig,
	/// Exclusion configuration using gitignore-style patterns.
	#[serde(default)]
	pub exclude: ExcludeConfig,
	/// Directory that `~`-prefixed stylesheet imports resolve against,
	/// relative to the project root. Defaults to `node_modules`.
	#[serde(default = "default_package_root")]
	pub package_root: PathBuf,
	/// Maximum file size in bytes to transform. Files larger than this are
	/// rejected individually. Defaults to 10 MB.
	#[serde(default = "default_max_file_size")]
	pub max_file_size: u64,
	/// When true, `.gitignore` files are not used for filtering. By default
	/// (`false`), resin respects `.gitignore` patterns and skips files that
	/// would be ignored by git.
	#[serde(default)]
	pub disable_gitignore: bool,
}

/// Glob patterns selecting which files to transform.
#[derive(Debug, Default, Deserialize)]
pub struct IncludeConfig {
	#[serde(default)]
	pub patterns: Vec<String>,
}

/// Gitignore-style patterns excluded from the walk.
#[derive(Debug, Default, Deserialize)]
pub struct ExcludeConfig {
	#[serde(default)]
	pub patterns: Vec<String>,
}

impl ResinConfig {
	/// Load the project's config file, trying each discovery candidate in
	/// order. Returns `None` when no config file exists — all defaults apply.
	pub fn load(root: &Path) -> ResinResult<Option<Self>> {
		for candidate in CONFIG_FILE_CANDIDATES {
			let path = root.join(candidate);
			if !path.is_file() {
				continue;
			}

			let content = std::fs::read_to_string(&path)?;
			let config = toml::from_str(&content)
				.map_err(|error| ResinError::ConfigParse(error.to_string()))?;
			return Ok(Some(config));
		}

		Ok(None)
	}
}

fn default_max_file_size() -> u64 {
	DEFAULT_MAX_FILE_SIZE
}

fn default_package_root() -> PathBuf {
	PathBuf::from(DEFAULT_PACKAGE_ROOT)
}
