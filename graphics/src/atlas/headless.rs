use std::collections::HashMap;

use crate::atlas::{Backend, MapId};
use crate::Size;

/// A [`Backend`] keeping uploaded maps in memory.
///
/// Useful for software renderers and for inspecting what a GPU backend
/// would have received.
#[derive(Debug, Default)]
pub struct Headless {
    bitmaps: HashMap<MapId, Bitmap>,
    uploads: usize,
}

/// A map as last uploaded to a [`Headless`] backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    /// The size of the map.
    pub size: Size<u32>,
    /// RGBA bytes, row by row.
    pub bytes: Vec<u8>,
}

impl Headless {
    /// Creates a backend holding no bitmaps.
    pub fn new() -> Self {
        Self::default()
    }

    /// The bytes last uploaded for `map`, if it is still alive.
    pub fn bitmap(&self, map: MapId) -> Option<&[u8]> {
        self.bitmaps.get(&map).map(|bitmap| &bitmap.bytes[..])
    }

    /// The amount of bitmaps currently held.
    pub fn len(&self) -> usize {
        self.bitmaps.len()
    }

    /// Returns true if no bitmap is held.
    pub fn is_empty(&self) -> bool {
        self.bitmaps.is_empty()
    }

    /// The amount of uploads received so far.
    pub fn uploads(&self) -> usize {
        self.uploads
    }
}

impl Backend for Headless {
    type Texture = Bitmap;

    fn texture(&self, map: MapId) -> Option<&Self::Texture> {
        self.bitmaps.get(&map)
    }

    fn upload(&mut self, map: MapId, size: Size<u32>, pixels: &[u8]) {
        let bitmap = self.bitmaps.entry(map).or_insert_with(|| Bitmap {
            size,
            bytes: Vec::new(),
        });

        bitmap.size = size;
        bitmap.bytes.clear();
        bitmap.bytes.extend_from_slice(pixels);

        self.uploads += 1;
    }

    fn release(&mut self, map: MapId) {
        let _ = self.bitmaps.remove(&map);
    }
}
