//! Physical file backend using memory-mapped I/O.
//!
//! [`Physical`] maps an input file directly into the process address space and
//! implements [`crate::file::Backend`] over the mapping. Contract bytecode files
//! are small, but mapping keeps loading allocation-free and gives the same
//! read-only slice semantics as the in-memory backend.

use memmap2::Mmap;
use std::{fs, path::Path};

use crate::{file::Backend, Result};

/// A file backend that memory-maps its input.
pub struct Physical {
    data: Mmap,
}

impl Physical {
    /// Map the file at `path` into memory.
    ///
    /// # Arguments
    /// * `path` - Path of the file to map
    ///
    /// # Errors
    /// Returns [`crate::Error::FileError`] if the file cannot be opened or mapped.
    pub fn new(path: &Path) -> Result<Self> {
        let file = fs::File::open(path)?;

        // Mapping is read-only; the OS guarantees the slice stays valid for
        // the lifetime of the Mmap.
        let data = unsafe { Mmap::map(&file)? };

        Ok(Physical { data })
    }
}

impl Backend for Physical {
    fn data(&self) -> &[u8] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn maps_file_contents() {
        let mut path = std::env::temp_dir();
        path.push("evmscope_physical_test.bin");

        {
            let mut file = fs::File::create(&path).unwrap();
            file.write_all(&[0x60, 0x05, 0x00]).unwrap();
        }

        let physical = Physical::new(&path).unwrap();
        assert_eq!(physical.data(), &[0x60, 0x05, 0x00]);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn missing_file_errors() {
        let result = Physical::new(Path::new("/nonexistent/evmscope.bin"));
        assert!(result.is_err());
    }
}
