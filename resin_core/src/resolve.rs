use std::path::Path;
use std::path::PathBuf;

/// Resolve a relative resource reference against the directory containing the
/// referencing source file.
///
/// Pure path arithmetic with no I/O and no failure mode: a malformed or
/// dangling reference simply yields a path that does not exist, which
/// surfaces later as a read failure on the resource.
pub fn resolve_reference(base_dir: &Path, reference: &str) -> PathBuf {
	let reference = Path::new(reference);
	if reference.is_absolute() {
		return reference.to_path_buf();
	}

	// `join` would keep redundant `./` segments; strip them so the resolved
	// path matches what the on-disk lookup expects.
	let mut resolved = base_dir.to_path_buf();
	for component in reference.components() {
		match component {
			std::path::Component::CurDir => {}
			std::path::Component::ParentDir => {
				resolved.pop();
			}
			other => resolved.push(other),
		}
	}
	resolved
}
