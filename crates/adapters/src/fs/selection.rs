use std::path::Path;

use filepick_domain::{guess_mime_type, BlobSource, RawFile};
use walkdir::WalkDir;

use crate::SelectionError;

pub fn raw_file_from_path(path: &Path) -> Result<RawFile, SelectionError> {
    let metadata = path.metadata()?;
    let name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default()
        .to_string();

    Ok(RawFile::new(
        name,
        metadata.len(),
        guess_mime_type(path),
        BlobSource::Path(path.to_path_buf()),
    )?)
}

/// One selection batch: the file itself, or every file below a
/// directory in file-name order.
pub fn collect_selection(path: &Path) -> Result<Vec<RawFile>, SelectionError> {
    if path.is_file() {
        return Ok(vec![raw_file_from_path(path)?]);
    }
    if !path.is_dir() {
        return Err(SelectionError::NotFound(path.display().to_string()));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(path)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
    {
        if !entry.file_type().is_file() {
            continue;
        }
        files.push(raw_file_from_path(entry.path())?);
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn file_metadata_comes_from_disk() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("photo.JPG");
        std::fs::write(&path, vec![0_u8; 42]).expect("write");

        let file = raw_file_from_path(&path).expect("raw file");
        assert_eq!(file.name(), "photo.JPG");
        assert_eq!(file.size(), 42);
        assert_eq!(file.mime_type(), "image/jpeg");
    }

    #[test]
    fn directory_expands_to_sorted_files() {
        let dir = TempDir::new().expect("tempdir");
        std::fs::create_dir(dir.path().join("nested")).expect("mkdir");
        std::fs::write(dir.path().join("b.png"), b"b").expect("write");
        std::fs::write(dir.path().join("a.txt"), b"a").expect("write");
        std::fs::write(dir.path().join("nested").join("c.gif"), b"c").expect("write");

        let files = collect_selection(dir.path()).expect("selection");
        let names: Vec<&str> = files.iter().map(RawFile::name).collect();
        assert_eq!(names, vec!["a.txt", "b.png", "c.gif"]);
    }

    #[test]
    fn missing_path_is_rejected() {
        let dir = TempDir::new().expect("tempdir");
        let result = collect_selection(&dir.path().join("nope"));
        assert!(matches!(result, Err(SelectionError::NotFound(_))));
    }
}
