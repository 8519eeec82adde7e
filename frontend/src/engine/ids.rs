//! Per-session upload identifiers.

use std::cell::Cell;

use crate::types::UploadId;

/// Hands out `upload-1`, `upload-2`, ...
///
/// Counter based so files picked in the same tick never collide.
#[derive(Debug, Default)]
pub struct IdGenerator {
    next: Cell<u64>,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&self) -> UploadId {
        let n = self.next.get() + 1;
        self.next.set(n);
        UploadId::new(format!("upload-{}", n))
    }
}
