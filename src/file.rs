// src/file.rs

use std::{fs, path::{Path, PathBuf}};

use crate::error::ScrapeError;
use crate::scrape::AssetLink;

pub fn ensure_directory(dir: &Path) -> Result<(), ScrapeError> {
    let io_err = |source| ScrapeError::Io { path: dir.to_path_buf(), source };
    if dir.exists() && !dir.is_dir() {
        return Err(io_err(std::io::Error::new(
            std::io::ErrorKind::AlreadyExists,
            "path exists but is not a directory",
        )));
    }
    if !dir.exists() { fs::create_dir_all(dir).map_err(io_err)?; }
    Ok(())
}

/// Where `link` is saved inside `dir`. Its presence there is the only
/// record that the item is done.
pub fn destination(dir: &Path, link: &AssetLink) -> PathBuf {
    dir.join(link.filename())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_directory_creates_nested_and_rejects_files() {
        let tmp = tempfile::tempdir().unwrap();
        let nested = tmp.path().join("cvpr2020").join("Oral_1");
        ensure_directory(&nested).unwrap();
        assert!(nested.is_dir());
        // idempotent
        ensure_directory(&nested).unwrap();

        let file = tmp.path().join("plain");
        fs::write(&file, b"x").unwrap();
        assert!(matches!(ensure_directory(&file), Err(ScrapeError::Io { .. })));
    }

    #[test]
    fn destination_uses_link_file_name() {
        let link = AssetLink::new("http://h/papers/A_B_CVPR_2020_paper.pdf").unwrap();
        assert_eq!(
            destination(Path::new("out/s1"), &link),
            Path::new("out/s1/A_B_CVPR_2020_paper.pdf")
        );
    }
}
