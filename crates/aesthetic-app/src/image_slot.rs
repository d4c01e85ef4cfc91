//! Single-slot holder for the current image.
//!
//! Loads resolve in any order; whichever finishes last becomes current. The
//! slot is shared between the session and its background tasks.

use std::sync::Arc;

use parking_lot::Mutex;

use aesthetic_core::FilterImage;

/// The image currently being edited.
#[derive(Debug, Clone)]
pub struct LoadedImage {
    pub image: Arc<FilterImage>,
    /// Store counter at the time this image became current.
    pub generation: u64,
}

#[derive(Debug, Default)]
pub struct ImageSlot {
    inner: Mutex<SlotInner>,
}

/// Counter and image change together so a higher generation is never
/// overwritten by a lower one.
#[derive(Debug, Default)]
struct SlotInner {
    current: Option<LoadedImage>,
    stores: u64,
}

impl ImageSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current image, returning its generation.
    pub fn store(&self, image: FilterImage) -> LoadedImage {
        let image = Arc::new(image);
        let mut inner = self.inner.lock();
        inner.stores += 1;
        let loaded = LoadedImage {
            image,
            generation: inner.stores,
        };
        inner.current = Some(loaded.clone());
        loaded
    }

    /// The current image, if any has been loaded.
    pub fn current(&self) -> Option<LoadedImage> {
        self.inner.lock().current.clone()
    }
}
