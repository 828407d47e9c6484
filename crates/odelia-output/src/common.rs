//! Shared helpers for writing output files.

use std::fs;
use std::path::Path;

use csv::{Terminator, WriterBuilder};

use crate::error::{OutputError, Result};

/// Ensure a directory exists.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|source| OutputError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })
}

/// Ensure a parent directory exists for a file path.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        ensure_dir(parent)?;
    }
    Ok(())
}

/// Writes a header row and records as `\n`-terminated CSV.
pub fn write_csv<H, R, C>(path: &Path, headers: &[H], rows: R) -> Result<()>
where
    H: AsRef<str>,
    R: IntoIterator<Item = C>,
    C: IntoIterator,
    C::Item: AsRef<[u8]>,
{
    ensure_parent_dir(path)?;
    let mut writer = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_path(path)
        .map_err(|e| OutputError::csv(path, &e))?;
    writer
        .write_record(headers.iter().map(<H as AsRef<str>>::as_ref))
        .map_err(|e| OutputError::csv(path, &e))?;
    for row in rows {
        writer
            .write_record(row)
            .map_err(|e| OutputError::csv(path, &e))?;
    }
    writer.flush().map_err(|source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn writes_quoted_csv_with_unix_newlines() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("nested").join("out.csv");
        write_csv(&path, &["A", "B"], vec![vec!["1", "x,y"]]).expect("write csv");
        let content = fs::read_to_string(&path).expect("read csv");
        assert_eq!(content, "A,B\n1,\"x,y\"\n");
    }
}
