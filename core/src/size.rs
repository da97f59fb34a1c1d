/// An amount of space in 2 dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size<T = u32> {
    /// The width.
    pub width: T,
    /// The height.
    pub height: T,
}

impl<T> Size<T> {
    /// Creates a new [`Size`] with the given width and height.
    pub const fn new(width: T, height: T) -> Self {
        Size { width, height }
    }
}

impl Size<u32> {
    /// Returns the area covered by the [`Size`].
    pub fn area(self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// Returns true if both dimensions are powers of two.
    pub fn is_power_of_two(self) -> bool {
        self.width.is_power_of_two() && self.height.is_power_of_two()
    }

    /// Rounds both dimensions up to the next power of two, or returns
    /// `None` if either does not fit in a `u32`.
    pub fn checked_next_power_of_two(self) -> Option<Self> {
        Some(Size::new(
            self.width.checked_next_power_of_two()?,
            self.height.checked_next_power_of_two()?,
        ))
    }

    /// Returns the component-wise maximum of two sizes.
    pub fn max(self, other: Self) -> Self {
        Size::new(
            self.width.max(other.width),
            self.height.max(other.height),
        )
    }
}

impl<T> From<(T, T)> for Size<T> {
    fn from((width, height): (T, T)) -> Self {
        Size { width, height }
    }
}

#[cfg(test)]
mod tests {
    use super::Size;

    #[test]
    fn rounds_up_each_dimension() {
        assert_eq!(
            Size::new(600, 17).checked_next_power_of_two(),
            Some(Size::new(1024, 32))
        );
        assert_eq!(
            Size::new(512, 512).checked_next_power_of_two(),
            Some(Size::new(512, 512))
        );
    }

    #[test]
    fn rounding_past_u32_is_none() {
        assert_eq!(Size::new(u32::MAX, 1).checked_next_power_of_two(), None);
        assert_eq!(
            Size::new(1, (1 << 31) + 1).checked_next_power_of_two(),
            None
        );
    }

    #[test]
    fn power_of_two_requires_both_dimensions() {
        assert!(Size::new(64, 2048).is_power_of_two());
        assert!(!Size::new(64, 100).is_power_of_two());
        assert!(!Size::new(0, 64).is_power_of_two());
    }
}
