//! Rotating temporary file names for generated macros
//!
//! Generated scripts cycle through a small fixed set of names so a file the
//! host may still be compiling or holding open is not overwritten by the very
//! next run.

use once_cell::sync::OnceCell;
use rand::Rng;
use std::sync::{Arc, Mutex};
use tracing::trace;

/// Number of distinct macro file names in rotation
pub const MAX_TEMP_FILES: usize = 32;

/// Extensions the host leaves next to a compiled macro
pub const BYPRODUCT_EXTENSIONS: [&str; 2] = ["dll", "pdb"];

pub fn macro_file_name(index: usize) -> String {
    format!("macro_{index:02}.cs")
}

static GLOBAL_ALLOCATOR: OnceCell<Arc<SlotAllocator>> = OnceCell::new();

/// Hands out macro file names from a rotating cursor.
///
/// The cursor is unset until the first call, which picks a random starting
/// slot. Every later call moves one slot forward, wrapping at
/// [`MAX_TEMP_FILES`].
#[derive(Debug, Default)]
pub struct SlotAllocator {
    cursor: Mutex<Option<usize>>,
}

impl SlotAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// An allocator whose first name is `start` (taken modulo the slot count).
    pub fn starting_at(start: usize) -> Self {
        let previous = (start % MAX_TEMP_FILES + MAX_TEMP_FILES - 1) % MAX_TEMP_FILES;
        Self {
            cursor: Mutex::new(Some(previous)),
        }
    }

    /// Process-wide allocator shared by runners that are not given their own.
    pub fn global() -> Arc<SlotAllocator> {
        GLOBAL_ALLOCATOR
            .get_or_init(|| Arc::new(SlotAllocator::new()))
            .clone()
    }

    pub fn next_index(&self) -> usize {
        let mut cursor = self.cursor.lock().unwrap_or_else(|e| e.into_inner());
        let index = match *cursor {
            None => rand::thread_rng().gen_range(0..MAX_TEMP_FILES),
            Some(current) => (current + 1) % MAX_TEMP_FILES,
        };
        *cursor = Some(index);
        trace!(index, "Allocated macro slot");
        index
    }

    pub fn next_name(&self) -> String {
        macro_file_name(self.next_index())
    }
}
