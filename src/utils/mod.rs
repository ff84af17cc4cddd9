// resyze/src/utils/mod.rs
use crate::core::{ResyzeError, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

pub const RESIZED_SUFFIX: &str = "_resized";

pub const SUPPORTED_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "bmp", "gif", "tiff"];

/// Case-insensitive extension check; file content is never inspected.
pub fn is_supported_format(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| ext.eq_ignore_ascii_case(supported))
        })
        .unwrap_or(false)
}

/// `dir/photo.JPG` -> `dir/photo_resized.JPG`
pub fn derive_file_output(input_path: &Path) -> PathBuf {
    let Some(stem) = input_path.file_stem() else {
        return append_suffix(input_path);
    };

    let mut file_name = OsString::from(stem);
    file_name.push(RESIZED_SUFFIX);
    if let Some(extension) = input_path.extension() {
        file_name.push(".");
        file_name.push(extension);
    }

    input_path.with_file_name(file_name)
}

/// `photos` -> `photos_resized`, as a sibling of the input directory.
pub fn derive_directory_output(input_root: &Path) -> PathBuf {
    match input_root.file_name() {
        Some(name) => {
            let mut dir_name = OsString::from(name);
            dir_name.push(RESIZED_SUFFIX);
            input_root.with_file_name(dir_name)
        }
        None => append_suffix(input_root),
    }
}

fn append_suffix(path: &Path) -> PathBuf {
    let mut raw = path.as_os_str().to_os_string();
    raw.push(RESIZED_SUFFIX);
    PathBuf::from(raw)
}

/// Single-file mode: an explicit output is used verbatim.
pub fn plan_single_file(input_path: &Path, output: Option<&Path>) -> PathBuf {
    match output {
        Some(path) => path.to_path_buf(),
        None => derive_file_output(input_path),
    }
}

pub fn resolve_output_root(input_root: &Path, output: Option<&Path>) -> PathBuf {
    match output {
        Some(path) => path.to_path_buf(),
        None => derive_directory_output(input_root),
    }
}

/// Directory mode: `output_root / relative_dir / file_name`.
pub fn plan_directory_file(output_root: &Path, relative_path: &Path) -> PathBuf {
    output_root.join(relative_path)
}

/// Creates `dir` and any missing parents. An existing directory is not an error.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    if dir.as_os_str().is_empty() {
        return Ok(());
    }

    std::fs::create_dir_all(dir).map_err(|source| ResyzeError::DirectoryCreation {
        path: dir.to_path_buf(),
        source,
    })
}

pub fn ensure_parent_dir(output_path: &Path) -> Result<()> {
    match output_path.parent() {
        Some(parent) => ensure_dir(parent),
        None => Ok(()),
    }
}
