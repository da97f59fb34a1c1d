//! Pack bitmaps into shared texture maps.
//!
//! Glyphs, icons and skin images are small and many; drawing each from its
//! own texture would be wasteful. The [`Atlas`] places them as fragments of
//! a few large power-of-two maps, deduplicated by [`FragmentId`], and hands
//! the maps to a [`Backend`] when they change.
//!
//! # Examples
//!
//! ```
//! use elemental_forms_graphics::atlas::{Allocation, Atlas, Headless, Image};
//! use elemental_forms_graphics::{FragmentId, Rectangle};
//!
//! let mut atlas = Atlas::new(Headless::new());
//!
//! let pixels = [0xff00_00ffu32; 10 * 16];
//! let id = FragmentId::from_label("glyph_A");
//!
//! let fragment = atlas
//!     .get_or_create(id, &Image::new(10, 16, &pixels), Allocation::Shared)?;
//! assert_eq!(fragment.rectangle(), Rectangle::new(0, 0, 10, 16));
//!
//! // Once per frame, before painting.
//! assert!(atlas.validate_bitmaps());
//!
//! let _ = atlas.free(id);
//! # Ok::<(), elemental_forms_graphics::atlas::Error>(())
//! ```
pub mod entry;

mod allocation;
mod allocator;
mod error;
mod headless;
mod map;
mod settings;
mod verifier;

use std::collections::HashMap;

pub use allocation::Allocation;
pub use allocator::{RowSpaceAllocator, Span};
pub use entry::{Fragment, Image};
pub use error::Error;
pub use headless::{Bitmap, Headless};
pub use map::{FragmentMap, Placement, Row};
pub use settings::{Settings, BORDER_WIDTH, DEFAULT_MAP_SIZE, MAX_MAP_SIZE};
pub use verifier::Verifier;

use crate::{FragmentId, Size};

use log::{debug, info, warn};

/// A Backend interfacing between the atlas and the storage of its maps,
/// usually GPU textures.
pub trait Backend: std::fmt::Debug {
    /// The type of the texture the renderer needs access to to display
    /// fragments.
    type Texture;

    /// The texture holding `map`, if it has been uploaded.
    fn texture(&self, map: MapId) -> Option<&Self::Texture>;

    /// Replaces the whole contents of `map` with `pixels`, creating the
    /// texture first if needed. `pixels` holds `size.width * size.height`
    /// RGBA texels.
    fn upload(&mut self, map: MapId, size: Size<u32>, pixels: &[u8]);

    /// Releases the texture of `map`.
    fn release(&mut self, map: MapId);
}

/// Identifies a [`FragmentMap`] of an [`Atlas`].
///
/// Maps are never moved nor removed until [`Atlas::clear`], so an id stays
/// valid as long as the fragments referring to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MapId(usize);

impl MapId {
    pub(crate) const fn new(index: usize) -> Self {
        MapId(index)
    }

    /// The position of the map in creation order.
    pub const fn index(self) -> usize {
        self.0
    }
}

/// A set of fragment maps with deduplicated fragments.
#[derive(Debug)]
pub struct Atlas<B: Backend> {
    backend: B,
    settings: Settings,
    maps: Vec<FragmentMap>,
    fragments: HashMap<FragmentId, Fragment>,
    verifier: Option<Verifier>,
}

impl<B: Backend> Atlas<B> {
    /// Creates an atlas with the default [`Settings`].
    pub fn new(backend: B) -> Self {
        Atlas {
            backend,
            settings: Settings::default(),
            maps: Vec::new(),
            fragments: HashMap::new(),
            verifier: None,
        }
    }

    /// Creates an atlas with the given [`Settings`].
    pub fn with_settings(
        backend: B,
        settings: Settings,
    ) -> Result<Self, Error> {
        settings.validate()?;

        Ok(Atlas {
            settings,
            ..Atlas::new(backend)
        })
    }

    /// Returns the fragment stored under `id`, placing `image` first if
    /// there is none.
    ///
    /// An existing fragment is returned as is, even if `image` differs from
    /// what it was created with. [`free`](Self::free) it first to replace
    /// its contents.
    pub fn get_or_create(
        &mut self,
        id: FragmentId,
        image: &Image<'_>,
        allocation: Allocation,
    ) -> Result<&Fragment, Error> {
        if self.fragments.contains_key(&id) {
            return Ok(&self.fragments[&id]);
        }

        image.validate()?;

        let (map, placement) = match allocation {
            Allocation::Shared => self.insert_shared(image)?,
            Allocation::Dedicated {
                min_width,
                min_height,
            } => {
                let min_size = Size::new(min_width, min_height);

                self.insert_dedicated(image, min_size)?
            }
        };

        debug!(
            "Placed fragment {:?} in map {} at {:?}",
            id,
            map.index(),
            placement.rectangle
        );

        let fragment = Fragment {
            id,
            map,
            row: placement.row,
            span: placement.span,
            rectangle: placement.rectangle,
        };

        let fragment: &Fragment = self.fragments.entry(id).or_insert(fragment);

        Ok(fragment)
    }

    /// Like [`get_or_create`](Self::get_or_create), hashing `label` into the
    /// id. The installed [`Verifier`], if any, checks the label first.
    pub fn get_or_create_named(
        &mut self,
        label: &str,
        image: &Image<'_>,
        allocation: Allocation,
    ) -> Result<&Fragment, Error> {
        let id = FragmentId::from_label(label);

        if let Some(verifier) = &mut self.verifier {
            verifier.check(id, label);
        }

        self.get_or_create(id, image, allocation)
    }

    /// The fragment stored under `id`.
    pub fn get(&self, id: FragmentId) -> Option<&Fragment> {
        self.fragments.get(&id)
    }

    /// Returns true if a fragment is stored under `id`.
    pub fn contains(&self, id: FragmentId) -> bool {
        self.fragments.contains_key(&id)
    }

    /// Removes the fragment stored under `id` and makes its space reusable.
    ///
    /// Maps left empty are kept around.
    pub fn free(&mut self, id: FragmentId) -> Option<Fragment> {
        let fragment = self.fragments.remove(&id)?;

        match self.maps.get_mut(fragment.map.index()) {
            Some(map) => map.remove(fragment.row, fragment.span),
            None => {
                debug_assert!(false, "{:?} points to a missing map", fragment)
            }
        }

        debug!("Freed fragment {:?} from map {}", id, fragment.map.index());

        Some(fragment)
    }

    /// Removes every fragment and map, releasing their textures.
    ///
    /// Every [`Fragment`] and [`MapId`] obtained so far becomes meaningless.
    pub fn clear(&mut self) {
        info!(
            "Clearing atlas: {} fragments in {} maps",
            self.fragments.len(),
            self.maps.len()
        );

        for (index, map) in self.maps.iter_mut().enumerate() {
            map.delete_bitmap(MapId::new(index), &mut self.backend);
        }

        self.maps.clear();
        self.fragments.clear();
    }

    /// Uploads every map that changed since its last upload.
    ///
    /// Returns true if anything was uploaded.
    pub fn validate_bitmaps(&mut self) -> bool {
        let mut uploaded = false;

        for (index, map) in self.maps.iter_mut().enumerate() {
            uploaded |=
                map.validate_bitmap(MapId::new(index), &mut self.backend);
        }

        uploaded
    }

    /// Releases the textures of every map while keeping all fragments.
    ///
    /// Used after the rendering context is lost; the next
    /// [`validate_bitmaps`](Self::validate_bitmaps) uploads everything again.
    pub fn delete_bitmaps(&mut self) {
        for (index, map) in self.maps.iter_mut().enumerate() {
            map.delete_bitmap(MapId::new(index), &mut self.backend);
        }
    }

    /// The share of map area covered by fragments, in percent.
    pub fn utilization_percent(&self) -> u32 {
        let total: u64 = self.maps.iter().map(|map| map.size().area()).sum();

        if total == 0 {
            return 0;
        }

        let used: u64 = self.maps.iter().map(FragmentMap::used_area).sum();

        (used * 100 / total) as u32
    }

    /// The amount of maps.
    pub fn map_count(&self) -> usize {
        self.maps.len()
    }

    /// The map identified by `id`.
    pub fn map(&self, id: MapId) -> Option<&FragmentMap> {
        self.maps.get(id.index())
    }

    /// The maps, in creation order.
    pub fn maps(&self) -> impl Iterator<Item = (MapId, &FragmentMap)> {
        self.maps
            .iter()
            .enumerate()
            .map(|(index, map)| (MapId::new(index), map))
    }

    /// The fragments, in no particular order.
    pub fn fragments(&self) -> impl Iterator<Item = &Fragment> {
        self.fragments.values()
    }

    /// The amount of fragments.
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// Returns true if there are no fragments.
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// The current [`Settings`].
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Limits the amount of maps. `0` means unlimited.
    ///
    /// Existing maps are kept even if there are more than `limit`.
    pub fn set_map_count_limit(&mut self, limit: usize) {
        self.settings.map_count_limit = limit;
    }

    /// Changes the size of maps created from now on.
    pub fn set_default_map_size(
        &mut self,
        size: Size<u32>,
    ) -> Result<(), Error> {
        let settings = Settings {
            default_map_size: size,
            ..self.settings
        };

        settings.validate()?;
        self.settings = settings;

        Ok(())
    }

    /// Installs a [`Verifier`] consulted by
    /// [`get_or_create_named`](Self::get_or_create_named).
    pub fn set_verifier(&mut self, verifier: Verifier) {
        self.verifier = Some(verifier);
    }

    /// The texture of `map`, if it has been uploaded.
    pub fn texture(&self, map: MapId) -> Option<&B::Texture> {
        self.backend.texture(map)
    }

    /// Access the backend
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Access the backend mutably
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    fn insert_shared(
        &mut self,
        image: &Image<'_>,
    ) -> Result<(MapId, Placement), Error> {
        for (index, map) in self.maps.iter_mut().enumerate() {
            if map.is_dedicated() || map.is_exhausted() {
                continue;
            }

            match map.try_insert(image) {
                Ok(placement) => return Ok((MapId::new(index), placement)),
                Err(Error::OutOfSpace) => {}
                Err(error) => return Err(error),
            }
        }

        let footprint = image.footprint(self.settings.border_width());
        let size = map_size(footprint, self.settings.default_map_size)?;

        self.create_map(size, false, image)
    }

    fn insert_dedicated(
        &mut self,
        image: &Image<'_>,
        min_size: Size<u32>,
    ) -> Result<(MapId, Placement), Error> {
        let footprint = image.footprint(self.settings.border_width());
        let floor = self.settings.default_map_size.max(min_size);
        let size = map_size(footprint, floor)?;

        self.create_map(size, true, image)
    }

    fn create_map(
        &mut self,
        size: Size<u32>,
        dedicated: bool,
        image: &Image<'_>,
    ) -> Result<(MapId, Placement), Error> {
        let limit = self.settings.map_count_limit;

        if limit != 0 && self.maps.len() >= limit {
            warn!(
                "Cannot place a {}x{} fragment: all {} maps are in use",
                image.width, image.height, limit
            );

            return Err(Error::AllocationFailed);
        }

        let mut map =
            FragmentMap::new(size, self.settings.border_width(), dedicated)?;
        let placement = map.try_insert(image)?;
        let id = MapId::new(self.maps.len());

        debug!(
            "Created fragment map {} ({}x{}, dedicated: {})",
            id.index(),
            size.width,
            size.height,
            dedicated
        );

        self.maps.push(map);

        Ok((id, placement))
    }
}

fn map_size(
    footprint: Size<u32>,
    floor: Size<u32>,
) -> Result<Size<u32>, Error> {
    let fits = |size: &Size<u32>| {
        size.width <= MAX_MAP_SIZE && size.height <= MAX_MAP_SIZE
    };

    footprint
        .max(floor)
        .checked_next_power_of_two()
        .filter(fits)
        .ok_or(Error::InvalidArgument("fragment is too large for a map"))
}
