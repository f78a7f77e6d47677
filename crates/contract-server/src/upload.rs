//! Staging of uploaded files
//!
//! Uploads are written to a named temporary file so the document loader can
//! dispatch on the original extension. The file is removed when the
//! [`NamedTempFile`] drops, on success and failure alike.

use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Write upload bytes to a temporary file whose name ends with `_<original name>`
pub fn stage_upload(file_name: &str, bytes: &[u8]) -> std::io::Result<NamedTempFile> {
    let base = Path::new(file_name)
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|n| !n.is_empty());
    let suffix = base.map(|n| format!("_{}", n)).unwrap_or_default();

    let mut file = tempfile::Builder::new()
        .prefix("contract-upload-")
        .suffix(&suffix)
        .tempfile()?;
    file.write_all(bytes)?;
    file.flush()?;
    Ok(file)
}

/// Stage an upload, run `f` on its path, then delete it
pub fn with_staged_upload<T, E>(
    file_name: &str,
    bytes: &[u8],
    f: impl FnOnce(&Path) -> Result<T, E>,
) -> Result<T, E>
where
    E: From<std::io::Error>,
{
    let staged = stage_upload(file_name, bytes)?;
    f(staged.path())
}
