use std::collections::HashSet;
use std::path::Path;
use std::path::PathBuf;

use futures::future::join_all;
use globset::Glob;
use globset::GlobSet;
use globset::GlobSetBuilder;
use ignore::gitignore::Gitignore;
use ignore::gitignore::GitignoreBuilder;

use crate::ResinError;
use crate::ResinResult;
use crate::config::DEFAULT_INCLUDE_PATTERN;
use crate::config::DEFAULT_MAX_FILE_SIZE;
use crate::config::DEFAULT_PACKAGE_ROOT;
use crate::config::ResinConfig;
use crate::engine::FileOutcome;
use crate::engine::TransformOptions;
use crate::engine::transform_file;
use crate::render::StyleRenderer;

/// Options for controlling a whole-project inlining run.
///
/// Use [`InlineOptions::default()`] for sensible defaults or
/// [`InlineOptions::from_config`] to construct from a [`ResinConfig`].
#[derive(Debug, Clone)]
pub struct InlineOptions {
	/// Glob patterns restricting which files are transformed.
	pub include_set: GlobSet,
	/// Gitignore-style patterns to exclude from the walk.
	pub exclude_patterns: Vec<String>,
	/// Directory `~`-prefixed stylesheet imports resolve against, relative
	/// to the project root.
	pub package_root: PathBuf,
	/// Maximum file size to transform in bytes.
	pub max_file_size: u64,
	/// Whether to disable `.gitignore` integration.
	pub disable_gitignore: bool,
	/// Report what would change without writing anything back.
	pub dry_run: bool,
}

impl Default for InlineOptions {
	fn default() -> Self {
		Self {
			include_set: build_glob_set(&[DEFAULT_INCLUDE_PATTERN.to_string()]),
			exclude_patterns: Vec::new(),
			package_root: PathBuf::from(DEFAULT_PACKAGE_ROOT),
			max_file_size: DEFAULT_MAX_FILE_SIZE,
			disable_gitignore: false,
			dry_run: false,
		}
	}
}

impl InlineOptions {
	/// Construct [`InlineOptions`] from a [`ResinConfig`].
	pub fn from_config(config: Option<&ResinConfig>) -> Self {
		let include_patterns = config
			.map(|c| c.include.patterns.clone())
			.filter(|patterns| !patterns.is_empty())
			.unwrap_or_else(|| vec![DEFAULT_INCLUDE_PATTERN.to_string()]);
		let exclude_patterns = config
			.map(|c| c.exclude.patterns.clone())
			.unwrap_or_default();
		let package_root = config
			.map_or_else(|| PathBuf::from(DEFAULT_PACKAGE_ROOT), |c| c.package_root.clone());
		let max_file_size = config.map_or(DEFAULT_MAX_FILE_SIZE, |c| c.max_file_size);
		let disable_gitignore = config.is_some_and(|c| c.disable_gitignore);

		Self {
			include_set: build_glob_set(&include_patterns),
			exclude_patterns,
			package_root,
			max_file_size,
			disable_gitignore,
			dry_run: false,
		}
	}
}

/// A per-file failure captured during a project run.
#[derive(Debug)]
pub struct FileFailure {
	/// The source file whose transformation was rejected.
	pub file: PathBuf,
	/// Why it was rejected.
	pub error: ResinError,
}

/// Result of one whole-project inlining batch with success and failure
/// tracking. The batch itself always completes: failures are collected per
/// file, never propagated across files.
#[derive(Debug, Default)]
pub struct InlineReport {
	/// Files whose references were inlined (rewritten unless dry-run).
	pub transformed: Vec<PathBuf>,
	/// Files with no inlinable references, left untouched.
	pub unchanged: Vec<PathBuf>,
	/// Files whose transformation was rejected.
	pub failures: Vec<FileFailure>,
}

impl InlineReport {
	/// Total number of candidate files processed.
	pub fn total(&self) -> usize {
		self.transformed.len() + self.unchanged.len() + self.failures.len()
	}

	/// Check if any per-file failures occurred.
	pub fn has_failures(&self) -> bool {
		!self.failures.is_empty()
	}
}

/// Scan the project root and load its config, then run the inliner over
/// every candidate file.
pub async fn run_project(root: &Path, dry_run: bool) -> ResinResult<InlineReport> {
	let config = ResinConfig::load(root)?;
	let mut options = InlineOptions::from_config(config.as_ref());
	options.dry_run = dry_run;
	run_project_with_options(root, &options).await
}

/// Run the inliner over every candidate file under `root` with the given
/// [`InlineOptions`].
///
/// All per-file transformations proceed concurrently; the returned report
/// settles only once every one of them has. A failure in one file never
/// aborts its siblings.
pub async fn run_project_with_options(
	root: &Path,
	options: &InlineOptions,
) -> ResinResult<InlineReport> {
	let files = collect_files(root, options)?;
	tracing::debug!(count = files.len(), root = %root.display(), "collected candidate files");

	let renderer = StyleRenderer::new(root.join(&options.package_root));
	let transform_options = TransformOptions {
		dry_run: options.dry_run,
	};
	let max_file_size = options.max_file_size;

	let tasks = files.iter().map(|file| {
		let renderer = &renderer;
		async move {
			let metadata = tokio::fs::metadata(file).await?;
			if metadata.len() > max_file_size {
				return Err(ResinError::FileTooLarge {
					path: file.display().to_string(),
					size: metadata.len(),
					limit: max_file_size,
				});
			}
			transform_file(file, renderer, transform_options).await
		}
	});

	let mut report = InlineReport::default();
	for (file, result) in files.iter().zip(join_all(tasks).await) {
		match result {
			Ok(FileOutcome::Transformed) => report.transformed.push(file.clone()),
			Ok(FileOutcome::Unchanged) => report.unchanged.push(file.clone()),
			Err(error) => {
				tracing::warn!(file = %file.display(), %error, "transformation rejected");
				report.failures.push(FileFailure {
					file: file.clone(),
					error,
				});
			}
		}
	}

	Ok(report)
}

/// Build a `GlobSet` from a list of glob pattern strings.
fn build_glob_set(patterns: &[String]) -> GlobSet {
	let mut builder = GlobSetBuilder::new();
	for pattern in patterns {
		if let Ok(glob) = Glob::new(pattern) {
			builder.add(glob);
		}
	}
	builder.build().unwrap_or_else(|_| GlobSet::empty())
}

/// Build a `Gitignore` matcher from exclude patterns specified in
/// `resin.toml` `[exclude]`. These follow `.gitignore` syntax and are
/// applied on top of any `.gitignore` rules.
fn build_exclude_matcher(root: &Path, patterns: &[String]) -> ResinResult<Gitignore> {
	let mut builder = GitignoreBuilder::new(root);
	for pattern in patterns {
		builder.add_line(None, pattern).map_err(|e| {
			ResinError::ConfigParse(format!("invalid exclude pattern `{pattern}`: {e}"))
		})?;
	}
	builder
		.build()
		.map_err(|e| ResinError::ConfigParse(format!("failed to build exclude rules: {e}")))
}

/// Build a `Gitignore` matcher from the project's `.gitignore` file (if any).
fn build_gitignore(root: &Path) -> Gitignore {
	let mut builder = GitignoreBuilder::new(root);
	let gitignore_path = root.join(".gitignore");
	if gitignore_path.exists() {
		let _ = builder.add(gitignore_path);
	}
	builder.build().unwrap_or_else(|_| Gitignore::empty())
}

/// Collect all candidate source files from a directory tree.
///
/// When `disable_gitignore` is false (the default), files matched by the
/// project's `.gitignore` are skipped. Exclude patterns from `[exclude]` in
/// `resin.toml` follow gitignore syntax and are always applied on top.
fn collect_files(root: &Path, options: &InlineOptions) -> ResinResult<Vec<PathBuf>> {
	let mut files = Vec::new();
	let mut visited_dirs = HashSet::new();

	let gitignore = if options.disable_gitignore {
		Gitignore::empty()
	} else {
		build_gitignore(root)
	};
	let custom_exclude = build_exclude_matcher(root, &options.exclude_patterns)?;

	walk_dir(
		root,
		root,
		&mut files,
		&options.include_set,
		&gitignore,
		&custom_exclude,
		&mut visited_dirs,
	)?;
	// Sort for deterministic ordering.
	files.sort();
	Ok(files)
}

fn is_ignored_directory_name(name: &str) -> bool {
	name.starts_with('.') || name == "node_modules" || name == "target"
}

fn walk_dir(
	root: &Path,
	dir: &Path,
	files: &mut Vec<PathBuf>,
	include_set: &GlobSet,
	gitignore: &Gitignore,
	custom_exclude: &Gitignore,
	visited_dirs: &mut HashSet<PathBuf>,
) -> ResinResult<()> {
	if !dir.is_dir() {
		return Ok(());
	}

	// Detect symlink cycles by tracking canonical paths.
	let canonical = dir.canonicalize().unwrap_or_else(|_| dir.to_path_buf());
	if !visited_dirs.insert(canonical) {
		return Err(ResinError::SymlinkCycle {
			path: dir.display().to_string(),
		});
	}

	let entries = std::fs::read_dir(dir)?;

	for entry in entries {
		let entry = entry?;
		let path = entry.path();

		// Skip hidden directories and common non-source directories.
		if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
			if is_ignored_directory_name(name) {
				continue;
			}
		}

		let is_dir = path.is_dir();

		if gitignore.matched(&path, is_dir).is_ignore() {
			continue;
		}
		if custom_exclude.matched(&path, is_dir).is_ignore() {
			continue;
		}

		if is_dir {
			walk_dir(
				root,
				&path,
				files,
				include_set,
				gitignore,
				custom_exclude,
				visited_dirs,
			)?;
		} else if let Ok(rel_path) = path.strip_prefix(root) {
			if include_set.is_match(rel_path) {
				files.push(path);
			}
		}
	}

	Ok(())
}
