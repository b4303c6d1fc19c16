//! In-memory buffer backend.
//!
//! [`Memory`] owns a `Vec<u8>` and implements [`crate::file::Backend`] for data
//! that is already in memory - decoded hex dumps, test fixtures, or bytecode
//! fetched over the network by a caller.

use crate::file::Backend;

/// A backend that owns its bytecode buffer.
pub struct Memory {
    data: Vec<u8>,
}

impl Memory {
    /// Create a new backend taking ownership of `data`.
    #[must_use]
    pub fn new(data: Vec<u8>) -> Self {
        Memory { data }
    }
}

impl Backend for Memory {
    fn data(&self) -> &[u8] {
        &self.data
    }
}
