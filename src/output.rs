use std::path::Path;

use crate::error::Error;
use crate::targets::Target;

/// Returns `true` if the package path designates the package root directory itself
pub fn is_current_dir(package: &str) -> bool {
    matches!(package.trim_end_matches('/'), "" | ".")
}

/// Returns the base name used for the binaries, before the target suffix.
///
/// An explicit `output` is used as is. Otherwise the last segment of the package path is used,
/// or the name of the first Go source file in `work_dir` when building the current directory.
pub fn base_name(output: Option<&str>, package: &str, work_dir: &Path) -> Result<String, Error> {
    if let Some(output) = output {
        return Ok(output.to_owned());
    }

    if is_current_dir(package) {
        return first_source_file(work_dir);
    }

    let name = package
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or(package);

    Ok(name.to_owned())
}

fn first_source_file(work_dir: &Path) -> Result<String, Error> {
    let pattern = format!(
        "{}/*.go",
        glob::Pattern::escape(&work_dir.to_string_lossy())
    );

    let mut sources: Vec<_> = glob::glob(&pattern)
        .map_err(|e| Error::Environment(format!("source files pattern `{pattern}`: {e}")))?
        .filter_map(Result::ok)
        .filter(|path| path.is_file())
        .collect();
    sources.sort_unstable();

    sources
        .first()
        .and_then(|path| path.file_stem())
        .map(|stem| stem.to_string_lossy().into_owned())
        .ok_or_else(|| Error::NoSourceFiles(work_dir.to_path_buf()))
}

/// Returns the file name of the binary built for `target` (e.g., `hello-windows-amd64.exe`)
pub fn target_output(base_name: &str, target: Target) -> String {
    let suffix = target.as_str().replace('/', "-");
    let extension = if target.is_windows() { ".exe" } else { "" };

    format!("{base_name}-{suffix}{extension}")
}
