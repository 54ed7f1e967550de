use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum ResinError {
	#[error(transparent)]
	#[diagnostic(code(resin::io_error))]
	Io(#[from] std::io::Error),

	#[error("referenced resource not found: `{path}` (referenced from `{referenced_from}`)")]
	#[diagnostic(
		code(resin::resource_not_found),
		help("check that the path is relative to the referencing source file")
	)]
	ResourceNotFound {
		path: String,
		referenced_from: String,
	},

	#[error("failed to compile stylesheet `{path}`: {reason}")]
	#[diagnostic(
		code(resin::style_compile),
		help("fix the stylesheet syntax or the unresolved import and re-run")
	)]
	StyleCompile { path: String, reason: String },

	#[error("malformed style list in `{file}`: {reason}")]
	#[diagnostic(
		code(resin::malformed_style_list),
		help(
			"`styleUrls` must be a bracketed list of single-quoted paths, e.g. \
			 `styleUrls: ['app.css', 'shared.scss']`"
		)
	)]
	MalformedStyleList { file: String, reason: String },

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(resin::config_parse),
		help("check that resin.toml is valid TOML with [include] and/or [exclude] sections")
	)]
	ConfigParse(String),

	#[error("file too large: `{path}` is {size} bytes (limit: {limit} bytes)")]
	#[diagnostic(
		code(resin::file_too_large),
		help("increase the file size limit in resin.toml or exclude this file")
	)]
	FileTooLarge { path: String, size: u64, limit: u64 },

	#[error("symlink cycle detected at: `{path}`")]
	#[diagnostic(
		code(resin::symlink_cycle),
		help("remove the circular symlink or exclude this path")
	)]
	SymlinkCycle { path: String },
}

pub type ResinResult<T> = Result<T, ResinError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
