use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Inline external component templates and stylesheets into their source files.",
	long_about = "resin rewrites component source files in place, replacing `templateUrl: \
	              '...'` references and `styleUrls: [...]` lists with the referenced files' \
	              contents embedded as string literals.\n\nStylesheets written in the SCSS \
	              superset are compiled to plain CSS before inlining; imports prefixed with `~` \
	              resolve from the configured package root.\n\nQuick start:\n  resin          \
	              Inline every candidate file under the current directory\n  resin path/    \
	              Inline a specific project root\n  resin --dry-run  Preview without writing"
)]
pub struct ResinCli {
	/// Path to the project root directory. Defaults to the current directory.
	pub path: Option<PathBuf>,

	/// Preview which files would change without writing anything back.
	#[arg(long, default_value_t = false)]
	pub dry_run: bool,

	/// Enable verbose output.
	#[arg(long, short, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, default_value_t = false)]
	pub no_color: bool,
}
