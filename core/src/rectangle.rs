use crate::Size;

/// A rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rectangle<T = u32> {
    /// X coordinate of the top-left corner.
    pub x: T,

    /// Y coordinate of the top-left corner.
    pub y: T,

    /// Width of the rectangle.
    pub width: T,

    /// Height of the rectangle.
    pub height: T,
}

impl<T: Copy> Rectangle<T> {
    /// Creates a new [`Rectangle`] with its top-left corner at `(x, y)`.
    pub const fn new(x: T, y: T, width: T, height: T) -> Self {
        Rectangle {
            x,
            y,
            width,
            height,
        }
    }

    /// Returns the [`Size`] of the [`Rectangle`].
    pub fn size(&self) -> Size<T> {
        Size::new(self.width, self.height)
    }

    /// Returns the position of the top-left corner.
    pub fn position(&self) -> (T, T) {
        (self.x, self.y)
    }
}

impl Rectangle<u32> {
    /// Returns true if the two rectangles share at least one pixel.
    pub fn intersects(&self, other: &Self) -> bool {
        let (a, b) = (self.widen(), other.widen());

        a.x < b.x + b.width
            && b.x < a.x + a.width
            && a.y < b.y + b.height
            && b.y < a.y + a.height
    }

    /// Returns true if `other` lies entirely inside `self`.
    pub fn contains(&self, other: &Self) -> bool {
        let (a, b) = (self.widen(), other.widen());

        b.x >= a.x
            && b.y >= a.y
            && b.x + b.width <= a.x + a.width
            && b.y + b.height <= a.y + a.height
    }

    fn widen(&self) -> Rectangle<u64> {
        Rectangle::new(
            u64::from(self.x),
            u64::from(self.y),
            u64::from(self.width),
            u64::from(self.height),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::Rectangle;

    #[test]
    fn touching_edges_do_not_intersect() {
        let left = Rectangle::new(0, 0, 30, 10);
        let right = Rectangle::new(30, 0, 40, 10);
        let below = Rectangle::new(0, 10, 30, 10);

        assert!(!left.intersects(&right));
        assert!(!left.intersects(&below));
        assert!(left.intersects(&Rectangle::new(29, 9, 5, 5)));
    }

    #[test]
    fn containment() {
        let outer = Rectangle::new(0, 0, 64, 64);

        assert!(outer.contains(&Rectangle::new(10, 10, 54, 54)));
        assert!(!outer.contains(&Rectangle::new(10, 10, 55, 8)));
    }

    #[test]
    fn edges_near_the_end_of_the_axis() {
        let max = u32::MAX;
        let outer = Rectangle::new(0, 0, max, max);
        let corner = Rectangle::new(max - 1, max - 1, 10, 10);

        assert!(!outer.contains(&corner));
        assert!(outer.contains(&Rectangle::new(max - 10, max - 10, 10, 10)));
        assert!(corner.intersects(&Rectangle::new(max, max, max, max)));
        assert!(!corner.intersects(&Rectangle::new(0, 0, max - 1, max)));
    }
}
