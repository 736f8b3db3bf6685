//! Atomic artifact writes.

use std::io::Write;
use std::path::Path;

use tempfile::Builder;

use crate::errors::{JpipeError, JpipeResult};

/// Write `contents` to `path` by persisting a temporary file created next to it.
///
/// A failure before the final rename leaves whatever was at `path` untouched.
pub fn write_atomic(path: impl AsRef<Path>, contents: &str) -> JpipeResult<()> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    #[cfg_attr(not(unix), allow(unused_mut))]
    let mut builder = Builder::new();
    // Request the mode of a plainly created file instead of tempfile's owner-only default; the umask still applies.
    #[cfg(unix)]
    {
        use std::fs::Permissions;
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(Permissions::from_mode(0o666));
    }
    let mut tmp = builder
        .tempfile_in(dir)
        .map_err(|e| JpipeError::io("create temporary file in", dir, e))?;
    tmp.write_all(contents.as_bytes())
        .map_err(|e| JpipeError::io("write temporary file for", path, e))?;
    tmp.flush().map_err(|e| JpipeError::io("flush temporary file for", path, e))?;
    tmp.persist(path).map_err(|source| JpipeError::Persist {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!(path = %path.display(), bytes = contents.len(), "wrote artifact");
    Ok(())
}
