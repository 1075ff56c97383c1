//! Filesystem helpers for atomic file replacement.

use std::fs;
use std::io;
use std::path::Path;

/// Move a finished temp file over `destination`.
///
/// `fs::rename` refuses to replace an existing file on some platforms
/// (notably Windows); in that case the destination is removed and the
/// rename retried. The temp file is removed if the move ultimately fails.
pub fn rename_with_fallback(temp_path: &Path, destination: &Path) -> io::Result<()> {
    let Err(first) = fs::rename(temp_path, destination) else {
        return Ok(());
    };

    let _ = fs::remove_file(destination);
    fs::rename(temp_path, destination).map_err(|retry| {
        let _ = fs::remove_file(temp_path);
        io::Error::new(
            retry.kind(),
            format!("rename failed twice (first: {}, retry: {})", first, retry),
        )
    })
}
