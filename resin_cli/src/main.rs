use std::path::Path;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use owo_colors::OwoColorize;
use resin_cli::ResinCli;
use resin_core::AnyEmptyResult;
use resin_core::InlineReport;
use resin_core::run_project;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
}

fn main() {
	let args = ResinCli::parse();

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	tracing_subscriber::fmt()
		.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
		.with_writer(std::io::stderr)
		.try_init()
		.ok();

	if let Err(e) = run(&args) {
		// Try to render through miette for rich diagnostics with help text
		// and error codes.
		match e.downcast::<resin_core::ResinError>() {
			Ok(resin_err) => {
				let report: miette::Report = (*resin_err).into();
				eprintln!("{report:?}");
			}
			Err(e) => {
				eprintln!("{} {e}", colored!("error:", red));
			}
		}
		process::exit(2);
	}
}

fn resolve_root(args: &ResinCli) -> PathBuf {
	args.path
		.clone()
		.unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

fn run(args: &ResinCli) -> AnyEmptyResult {
	let root = resolve_root(args);

	// All per-file operations interleave cooperatively on one thread; none
	// of them blocks another.
	let runtime = tokio::runtime::Builder::new_current_thread()
		.enable_all()
		.build()?;
	let report = runtime.block_on(run_project(&root, args.dry_run))?;

	if report.total() == 0 {
		println!("No candidate source files found.");
		return Ok(());
	}

	let InlineReport {
		transformed,
		unchanged,
		failures,
	} = report;

	// Per-file failures are reported and swallowed — the batch itself
	// succeeded.
	for failure in failures {
		let rel = make_relative(&failure.file, &root);
		eprintln!("{} {rel}", colored!("failed:", red));
		let rendered: miette::Report = failure.error.into();
		eprintln!("{rendered:?}");
	}

	if args.dry_run {
		println!(
			"Dry run: would inline {} file(s), {} unchanged.",
			transformed.len(),
			unchanged.len()
		);
	} else {
		println!(
			"Inlined {} file(s), {} unchanged.",
			transformed.len(),
			unchanged.len()
		);
	}

	if args.verbose {
		let mut paths: Vec<_> = transformed.iter().collect();
		paths.sort();
		for path in paths {
			let rel = make_relative(path, &root);
			println!("  {rel}");
		}
	}

	Ok(())
}

/// Make a path relative to root for display purposes.
fn make_relative(path: &Path, root: &Path) -> String {
	path.strip_prefix(root)
		.unwrap_or(path)
		.display()
		.to_string()
}
