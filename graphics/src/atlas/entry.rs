//! The data handed to and returned by an [`Atlas`].
//!
//! [`Atlas`]: crate::atlas::Atlas
use crate::atlas::{Error, MapId, Span};
use crate::{FragmentId, Rectangle, Size};

/// A block of 32-bit RGBA texels to place in an [`Atlas`].
///
/// `stride` is counted in texels and may exceed `width` when the image is a
/// sub-rectangle of a larger buffer.
///
/// [`Atlas`]: crate::atlas::Atlas
#[derive(Debug, Clone, Copy)]
pub struct Image<'a> {
    /// Width of the image, in texels.
    pub width: u32,
    /// Height of the image, in texels.
    pub height: u32,
    /// Distance between the starts of two consecutive rows, in texels.
    pub stride: u32,
    /// The texels, row by row.
    pub pixels: &'a [u32],
}

impl<'a> Image<'a> {
    /// Creates an [`Image`] whose rows are tightly packed.
    pub fn new(width: u32, height: u32, pixels: &'a [u32]) -> Self {
        Image {
            width,
            height,
            stride: width,
            pixels,
        }
    }

    /// Creates an [`Image`] with an explicit row stride.
    pub fn with_stride(
        width: u32,
        height: u32,
        stride: u32,
        pixels: &'a [u32],
    ) -> Self {
        Image {
            width,
            height,
            stride,
            pixels,
        }
    }

    /// Checks that the dimensions are positive and the buffer covers them.
    pub fn validate(&self) -> Result<(), Error> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidArgument(
                "fragment width and height must be positive",
            ));
        }

        if self.stride < self.width {
            return Err(Error::InvalidArgument(
                "stride must not be smaller than width",
            ));
        }

        let required = (self.stride as usize)
            .checked_mul(self.height as usize - 1)
            .and_then(|rows| rows.checked_add(self.width as usize));

        match required {
            Some(required) if required <= self.pixels.len() => Ok(()),
            _ => Err(Error::InvalidArgument("pixel buffer is too short")),
        }
    }

    /// The texels of row `y`.
    pub fn row(&self, y: u32) -> &'a [u32] {
        let start = y as usize * self.stride as usize;

        &self.pixels[start..start + self.width as usize]
    }

    pub(crate) fn footprint(&self, border: u32) -> Size<u32> {
        Size::new(
            self.width.saturating_add(2 * border),
            self.height.saturating_add(2 * border),
        )
    }
}

/// A rectangle of texels owned by the [`Atlas`].
///
/// [`Atlas`]: crate::atlas::Atlas
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub(crate) id: FragmentId,
    pub(crate) map: MapId,
    pub(crate) row: usize,
    pub(crate) span: Span,
    pub(crate) rectangle: Rectangle<u32>,
}

impl Fragment {
    /// The content key the fragment was created under.
    pub fn id(&self) -> FragmentId {
        self.id
    }

    /// The map holding the texels.
    pub fn map(&self) -> MapId {
        self.map
    }

    /// Index of the row of the map holding the texels.
    pub fn row(&self) -> usize {
        self.row
    }

    /// Where the texels are inside the map, border excluded.
    pub fn rectangle(&self) -> Rectangle<u32> {
        self.rectangle
    }

    /// The size of the fragment.
    pub fn size(&self) -> Size<u32> {
        self.rectangle.size()
    }

    /// The horizontal space reserved in the row, border included.
    pub fn span(&self) -> Span {
        self.span
    }
}
