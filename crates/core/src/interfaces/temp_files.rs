use crate::error::Result;
use std::path::PathBuf;

/// Allocates unique temporary file paths for exports and serialized
/// parameter payloads.
pub trait TempFileAllocator {
    /// A fresh path with the given extension in the run's temp area.
    fn new_temp_file(&self, extension: &str) -> Result<PathBuf>;

    /// A fresh path carrying exactly the given file name, placed in a
    /// unique subfolder of the shared temp area. Used for exports whose
    /// base name must survive (SAGA derives companion file names from it).
    fn new_temp_file_in_shared_folder(&self, file_name: &str) -> Result<PathBuf>;
}
