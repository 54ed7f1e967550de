use std::path::Path;

use futures::future::join_all;

use crate::ResinError;
use crate::ResinResult;
use crate::normalize::normalize;
use crate::parser::find_style_list;
use crate::parser::find_template_refs;
use crate::render::StyleRenderer;
use crate::resolve::resolve_reference;

/// Outcome of transforming a single source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
	/// References were inlined and the file was rewritten (or would have
	/// been, under dry-run).
	Transformed,
	/// The file contained no inlinable references; nothing was written.
	Unchanged,
}

/// Options controlling how files are transformed.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransformOptions {
	/// Report what would change without writing anything back.
	pub dry_run: bool,
}

/// Replace every `templateUrl: '<path>.html'` reference in `source` with
/// `template: "<content>"`, where the content is the referenced file's text
/// flattened by [`normalize`].
///
/// Matches are handled independently, in document order, with one load per
/// match. Sources without a template reference are returned unchanged.
pub async fn inline_templates(source: &str, origin: &Path) -> ResinResult<String> {
	let refs = find_template_refs(source);
	if refs.is_empty() {
		return Ok(source.to_string());
	}

	let base_dir = origin.parent().unwrap_or_else(|| Path::new(""));
	let mut result = String::with_capacity(source.len());
	let mut cursor = 0;

	for template_ref in refs {
		let resolved = resolve_reference(base_dir, &template_ref.path);
		let content = read_resource(&resolved, origin).await?;

		result.push_str(&source[cursor..template_ref.span.start]);
		result.push_str("template: \"");
		result.push_str(&normalize(&content));
		result.push('"');
		cursor = template_ref.span.end;
	}
	result.push_str(&source[cursor..]);

	Ok(result)
}

/// Replace the first `styleUrls: [...]` list in `source` with
/// `styles: ['<joined>']`, where each listed stylesheet is loaded, rendered
/// to plain CSS, and flattened by [`normalize`].
///
/// All stylesheet loads run concurrently; the rendered sheets are then
/// joined with `",\n"` in declaration order regardless of which load
/// finished first. Sources without a style list are returned unchanged.
pub async fn inline_styles(
	source: &str,
	origin: &Path,
	renderer: &StyleRenderer,
) -> ResinResult<String> {
	let Some(list) = find_style_list(source, origin)? else {
		return Ok(source.to_string());
	};

	let base_dir = origin.parent().unwrap_or_else(|| Path::new(""));
	let loads = list.paths.iter().map(|path| {
		let resolved = resolve_reference(base_dir, path);
		async move {
			let raw = read_resource(&resolved, origin).await?;
			let rendered = renderer.render(&raw, &resolved)?;
			Ok::<String, ResinError>(normalize(&rendered))
		}
	});

	// join_all yields results in declaration order, not completion order.
	let mut sheets = Vec::with_capacity(list.paths.len());
	for result in join_all(loads).await {
		sheets.push(result?);
	}

	let joined = sheets.join(",\n");
	let mut result =
		String::with_capacity(source.len() - (list.span.end - list.span.start) + joined.len() + 12);
	result.push_str(&source[..list.span.start]);
	result.push_str("styles: ['");
	result.push_str(&joined);
	result.push_str("']");
	result.push_str(&source[list.span.end..]);

	Ok(result)
}

/// Run both inlining passes over one source text: templates first, then
/// styles. The style pass sees the output of the template pass.
pub async fn transform_source(
	source: &str,
	origin: &Path,
	renderer: &StyleRenderer,
) -> ResinResult<String> {
	let templated = inline_templates(source, origin).await?;
	inline_styles(&templated, origin, renderer).await
}

/// Transform one file in place.
///
/// Reads the file, threads it through [`transform_source`], and writes the
/// result back to the same path when it differs from the original. A failure
/// at any stage rejects this file only — callers batching several files must
/// not let one rejection abort the rest.
pub async fn transform_file(
	path: &Path,
	renderer: &StyleRenderer,
	options: TransformOptions,
) -> ResinResult<FileOutcome> {
	let original = tokio::fs::read_to_string(path).await?;
	let transformed = transform_source(&original, path, renderer).await?;

	if transformed == original {
		tracing::trace!(file = %path.display(), "no inlinable references");
		return Ok(FileOutcome::Unchanged);
	}

	if !options.dry_run {
		tokio::fs::write(path, &transformed).await?;
	}
	tracing::debug!(file = %path.display(), dry_run = options.dry_run, "inlined external resources");

	Ok(FileOutcome::Transformed)
}

/// Read a referenced resource, mapping a missing file to
/// [`ResinError::ResourceNotFound`] so the report names both the resource
/// and the source file that referenced it.
async fn read_resource(path: &Path, origin: &Path) -> ResinResult<String> {
	match tokio::fs::read_to_string(path).await {
		Ok(content) => Ok(content),
		Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
			Err(ResinError::ResourceNotFound {
				path: path.display().to_string(),
				referenced_from: origin.display().to_string(),
			})
		}
		Err(error) => Err(error.into()),
	}
}
