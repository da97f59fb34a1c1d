use crate::atlas::{
    Backend, Error, Image, MapId, RowSpaceAllocator, Span, MAX_MAP_SIZE,
};
use crate::{Rectangle, Size};

/// A horizontal strip of a [`FragmentMap`].
///
/// Rows keep the height they were created with, even once the fragment that
/// caused their creation is gone.
#[derive(Debug, Clone)]
pub struct Row {
    y: u32,
    height: u32,
    allocator: RowSpaceAllocator,
}

impl Row {
    /// Vertical offset of the row inside its map.
    pub fn y(&self) -> u32 {
        self.y
    }

    /// Height of the row.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The allocator handing out horizontal space in the row.
    pub fn allocator(&self) -> &RowSpaceAllocator {
        &self.allocator
    }
}

/// Where a fragment was placed inside a [`FragmentMap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Index of the row holding the fragment.
    pub row: usize,
    /// The space reserved in the row, border included.
    pub span: Span,
    /// The texels of the fragment, border excluded.
    pub rectangle: Rectangle<u32>,
}

/// A fixed-size bitmap split into rows of fragments.
///
/// Texels are staged in a CPU buffer and pushed to the [`Backend`] as a
/// whole surface by [`validate_bitmap`](Self::validate_bitmap).
#[derive(Debug, Clone)]
pub struct FragmentMap {
    size: Size<u32>,
    border: u32,
    dedicated: bool,
    rows: Vec<Row>,
    rows_height: u32,
    pixels: Vec<u32>,
    dirty: bool,
    uploaded: bool,
    exhausted: bool,
}

impl FragmentMap {
    /// Creates an empty map.
    ///
    /// `border` texels of replicated edge are kept around every fragment.
    /// Both dimensions must lie in `1..=MAX_MAP_SIZE`.
    pub fn new(
        size: Size<u32>,
        border: u32,
        dedicated: bool,
    ) -> Result<Self, Error> {
        let in_range = |side: u32| side > 0 && side <= MAX_MAP_SIZE;

        if !in_range(size.width) || !in_range(size.height) {
            return Err(Error::InvalidArgument("map size is out of range"));
        }

        let texels = (size.width as usize)
            .checked_mul(size.height as usize)
            .ok_or(Error::InvalidArgument("map size is out of range"))?;

        Ok(FragmentMap {
            size,
            border,
            dedicated,
            rows: Vec::new(),
            rows_height: 0,
            pixels: vec![0; texels],
            dirty: false,
            uploaded: false,
            exhausted: false,
        })
    }

    /// Places `image` in the first row that can hold it, opening a new row
    /// below the existing ones when none can.
    pub fn try_insert(
        &mut self,
        image: &Image<'_>,
    ) -> Result<Placement, Error> {
        image.validate()?;

        let footprint = image.footprint(self.border);

        if footprint.width > self.size.width
            || footprint.height > self.size.height
        {
            return Err(Error::OutOfSpace);
        }

        let found = match self.find_in_rows(footprint) {
            Some(found) => Some(found),
            None => self.push_row(footprint),
        };

        let (row, span) = match found {
            Some(found) => found,
            None => {
                self.exhausted = self.is_full();
                return Err(Error::OutOfSpace);
            }
        };

        let rectangle = Rectangle::new(
            span.x + self.border,
            self.rows[row].y + self.border,
            image.width,
            image.height,
        );

        self.blit(image, rectangle);
        self.dirty = true;

        Ok(Placement {
            row,
            span,
            rectangle,
        })
    }

    /// Releases the space of a fragment.
    ///
    /// The texels are left as they are; the space is rewritten by the next
    /// fragment placed there.
    pub fn remove(&mut self, row: usize, span: Span) {
        match self.rows.get_mut(row) {
            Some(row) => row.allocator.free_space(span),
            None => debug_assert!(false, "row {} does not exist", row),
        }

        self.exhausted = false;
    }

    /// Uploads the staging buffer if it changed since the last upload.
    ///
    /// Returns true if an upload happened.
    pub fn validate_bitmap<B: Backend>(
        &mut self,
        id: MapId,
        backend: &mut B,
    ) -> bool {
        if !self.dirty {
            return false;
        }

        backend.upload(id, self.size, bytemuck::cast_slice(&self.pixels[..]));

        self.dirty = false;
        self.uploaded = true;

        true
    }

    /// Drops the bitmap held by the backend, keeping the packing state and
    /// the staging buffer. The next [`validate_bitmap`] uploads it again.
    ///
    /// [`validate_bitmap`]: Self::validate_bitmap
    pub fn delete_bitmap<B: Backend>(&mut self, id: MapId, backend: &mut B) {
        if !self.uploaded {
            return;
        }

        backend.release(id);

        self.uploaded = false;
        self.dirty = true;
    }

    /// The size of the map.
    pub fn size(&self) -> Size<u32> {
        self.size
    }

    /// The rows, top to bottom.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// The staging buffer, row by row.
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// The staged texel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> u32 {
        self.pixels[self.index(x, y)]
    }

    /// Returns true if the staging buffer changed since the last upload.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Returns true if the backend holds a bitmap for this map.
    pub fn is_uploaded(&self) -> bool {
        self.uploaded
    }

    /// Returns true if the map is full and skipped by shared allocations.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Returns true if the map was created for a single fragment.
    pub fn is_dedicated(&self) -> bool {
        self.dedicated
    }

    /// The sum of used span widths times the height of their rows.
    pub fn used_area(&self) -> u64 {
        self.rows
            .iter()
            .map(|row| {
                u64::from(row.allocator.used_space()) * u64::from(row.height)
            })
            .sum()
    }

    fn find_in_rows(&mut self, footprint: Size<u32>) -> Option<(usize, Span)> {
        self.rows
            .iter_mut()
            .enumerate()
            .filter(|(_, row)| row.height >= footprint.height)
            .find_map(|(index, row)| {
                row.allocator
                    .alloc_space(footprint.width)
                    .ok()
                    .map(|span| (index, span))
            })
    }

    fn push_row(&mut self, footprint: Size<u32>) -> Option<(usize, Span)> {
        if footprint.height > self.size.height - self.rows_height {
            return None;
        }

        let mut allocator = RowSpaceAllocator::new(self.size.width);
        let span = allocator.alloc_space(footprint.width).ok()?;

        self.rows.push(Row {
            y: self.rows_height,
            height: footprint.height,
            allocator,
        });
        self.rows_height += footprint.height;

        Some((self.rows.len() - 1, span))
    }

    fn is_full(&self) -> bool {
        let smallest = 1 + 2 * self.border;

        self.size.height - self.rows_height < smallest
            && self.rows.iter().all(|row| !row.allocator.has_space(smallest))
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.size.width as usize + x as usize
    }

    fn blit(&mut self, image: &Image<'_>, rectangle: Rectangle<u32>) {
        for y in 0..image.height {
            let start = self.index(rectangle.x, rectangle.y + y);

            self.pixels[start..start + image.width as usize]
                .copy_from_slice(image.row(y));
        }

        if self.border > 0 {
            self.replicate_edges(rectangle);
        }
    }

    fn replicate_edges(&mut self, rectangle: Rectangle<u32>) {
        let border = self.border as usize;
        let width = rectangle.width as usize;

        for y in rectangle.y..rectangle.y + rectangle.height {
            let left = self.index(rectangle.x, y);
            let right = left + width - 1;

            for offset in 1..=border {
                self.pixels[left - offset] = self.pixels[left];
                self.pixels[right + offset] = self.pixels[right];
            }
        }

        // Whole lines, corners included.
        let line = width + 2 * border;
        let last = rectangle.y + rectangle.height - 1;
        let top = self.index(rectangle.x, rectangle.y) - border;
        let bottom = self.index(rectangle.x, last) - border;
        let stride = self.size.width as usize;

        for offset in 1..=border {
            self.pixels.copy_within(top..top + line, top - offset * stride);
            self.pixels
                .copy_within(bottom..bottom + line, bottom + offset * stride);
        }
    }
}
