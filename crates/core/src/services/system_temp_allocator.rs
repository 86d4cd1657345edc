use crate::{
    error::{Error, Result},
    interfaces::TempFileAllocator,
};
use std::path::PathBuf;

/// Temp file allocation backed by a directory on the local filesystem.
///
/// Allocated files are not cleaned up by this type; they have to outlive
/// the call so the engine can read them later in the batch.
#[derive(Debug)]
pub struct SystemTempAllocator {
    root: PathBuf,
}

impl SystemTempAllocator {
    /// Allocates under the system temp directory.
    pub fn new() -> Result<Self> {
        Self::with_root(std::env::temp_dir().join("saga-runner"))
    }

    /// Allocates under the given directory, creating it if needed.
    pub fn with_root(root: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &std::path::Path {
        &self.root
    }
}

impl TempFileAllocator for SystemTempAllocator {
    fn new_temp_file(&self, extension: &str) -> Result<PathBuf> {
        let file = tempfile::Builder::new()
            .prefix("params")
            .suffix(&format!(".{extension}"))
            .tempfile_in(&self.root)?;
        let (_, path) = file
            .keep()
            .map_err(|e| Error::Other(format!("cannot keep temp file: {e}")))?;
        Ok(path)
    }

    fn new_temp_file_in_shared_folder(&self, file_name: &str) -> Result<PathBuf> {
        // A unique subfolder per call keeps the requested base name
        // intact without collisions
        let dir = tempfile::Builder::new()
            .prefix("export")
            .tempdir_in(&self.root)?;
        Ok(dir.keep().join(file_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_temp_file_carries_extension() {
        let dir = TempDir::new().unwrap();
        let alloc = SystemTempAllocator::with_root(dir.path().to_path_buf()).unwrap();

        let path = alloc.new_temp_file("txt").unwrap();
        assert_eq!(path.extension().unwrap(), "txt");
        assert!(path.starts_with(dir.path()));
    }

    #[test]
    fn test_shared_folder_preserves_file_name() {
        let dir = TempDir::new().unwrap();
        let alloc = SystemTempAllocator::with_root(dir.path().to_path_buf()).unwrap();

        let a = alloc.new_temp_file_in_shared_folder("layer.sgrd").unwrap();
        let b = alloc.new_temp_file_in_shared_folder("layer.sgrd").unwrap();
        assert_eq!(a.file_name().unwrap(), "layer.sgrd");
        assert_eq!(b.file_name().unwrap(), "layer.sgrd");
        // distinct subfolders, distinct paths
        assert_ne!(a, b);
    }
}
