use crate::atlas::Error;

/// A contiguous range along the axis of a [`RowSpaceAllocator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    /// Offset of the first unit of the span.
    pub x: u32,
    /// Length of the span.
    pub width: u32,
}

impl Span {
    /// Creates a new [`Span`].
    pub const fn new(x: u32, width: u32) -> Self {
        Span { x, width }
    }

    /// One past the last unit covered by the span.
    pub const fn end(self) -> u32 {
        self.x + self.width
    }
}

/// Allocates spans along a single row of a fragment map.
///
/// Free and used spans are both kept sorted by offset. Freed spans are
/// merged with their neighbours right away, so the free list never holds two
/// contiguous entries.
#[derive(Debug, Clone)]
pub struct RowSpaceAllocator {
    total: u32,
    available: u32,
    free: Vec<Span>,
    used: Vec<Span>,
}

impl RowSpaceAllocator {
    /// Creates an allocator covering `[0, total)`.
    pub fn new(total: u32) -> Self {
        let free = if total > 0 {
            vec![Span::new(0, total)]
        } else {
            Vec::new()
        };

        RowSpaceAllocator {
            total,
            available: total,
            free,
            used: Vec::new(),
        }
    }

    /// Returns true if a span of `width` could be allocated right now.
    pub fn has_space(&self, width: u32) -> bool {
        width > 0
            && width <= self.available
            && self.free.iter().any(|span| span.width >= width)
    }

    /// Allocates `width` units from the smallest free span that can hold
    /// them.
    pub fn alloc_space(&mut self, width: u32) -> Result<Span, Error> {
        if width == 0 {
            return Err(Error::InvalidArgument("span width must be positive"));
        }

        if width > self.available {
            return Err(Error::OutOfSpace);
        }

        let (index, _) = self
            .free
            .iter()
            .enumerate()
            .filter(|(_, span)| span.width >= width)
            .min_by_key(|(_, span)| span.width)
            .ok_or(Error::OutOfSpace)?;

        let free = &mut self.free[index];
        let span = Span::new(free.x, width);

        if free.width == width {
            let _ = self.free.remove(index);
        } else {
            free.x += width;
            free.width -= width;
        }

        let position = self.used.partition_point(|used| used.x < span.x);
        self.used.insert(position, span);
        self.available -= width;

        Ok(span)
    }

    /// Returns a span obtained from [`alloc_space`](Self::alloc_space).
    ///
    /// Passing a span this allocator did not hand out is a caller bug; it
    /// trips an assertion in debug builds and is ignored otherwise.
    pub fn free_space(&mut self, span: Span) {
        match self.used.binary_search_by_key(&span.x, |used| used.x) {
            Ok(index) if self.used[index] == span => {
                let _ = self.used.remove(index);
            }
            _ => {
                debug_assert!(false, "{:?} is not allocated here", span);
                return;
            }
        }

        self.available += span.width;

        let index = self.free.partition_point(|free| free.x < span.x);

        if index > 0 && self.free[index - 1].end() == span.x {
            self.free[index - 1].width += span.width;
        } else if index < self.free.len() && self.free[index].x == span.end() {
            let next = &mut self.free[index];
            next.x = span.x;
            next.width += span.width;
        } else {
            self.free.insert(index, span);
        }

        self.coalesce();
    }

    /// The length of the axis.
    pub fn total_space(&self) -> u32 {
        self.total
    }

    /// The sum of all free spans.
    pub fn available_space(&self) -> u32 {
        self.available
    }

    /// The sum of all used spans.
    pub fn used_space(&self) -> u32 {
        self.total - self.available
    }

    /// Returns true if nothing is allocated.
    pub fn is_empty(&self) -> bool {
        self.used.is_empty()
    }

    /// The free spans, in address order.
    pub fn free_spans(&self) -> &[Span] {
        &self.free
    }

    /// The used spans, in address order.
    pub fn used_spans(&self) -> &[Span] {
        &self.used
    }

    fn coalesce(&mut self) {
        self.free.dedup_by(|next, previous| {
            if previous.end() == next.x {
                previous.width += next.width;
                true
            } else {
                false
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_conserved(allocator: &RowSpaceAllocator) {
        let width = |spans: &[Span]| spans.iter().map(|s| s.width).sum::<u32>();
        let used = width(allocator.used_spans());
        let free = width(allocator.free_spans());

        assert_eq!(allocator.available_space(), allocator.total_space() - used);
        assert_eq!(free, allocator.available_space());
    }

    fn assert_coalesced(allocator: &RowSpaceAllocator) {
        for pair in allocator.free_spans().windows(2) {
            assert!(pair[0].end() < pair[1].x, "mergeable spans {:?}", pair);
        }
    }

    #[test]
    fn carves_from_the_start_of_the_axis() {
        let mut allocator = RowSpaceAllocator::new(100);

        assert_eq!(allocator.alloc_space(30), Ok(Span::new(0, 30)));
        assert_eq!(allocator.alloc_space(40), Ok(Span::new(30, 40)));
        assert_eq!(allocator.free_spans(), &[Span::new(70, 30)]);
        assert_conserved(&allocator);
    }

    #[test]
    fn zero_width_is_rejected() {
        let mut allocator = RowSpaceAllocator::new(100);

        assert!(matches!(
            allocator.alloc_space(0),
            Err(Error::InvalidArgument(_))
        ));
        assert!(!allocator.has_space(0));
        assert_eq!(allocator.available_space(), 100);
    }

    #[test]
    fn picks_the_smallest_fitting_span() {
        let mut allocator = RowSpaceAllocator::new(100);
        let a = allocator.alloc_space(20).unwrap();
        let _b = allocator.alloc_space(10).unwrap();
        let c = allocator.alloc_space(5).unwrap();
        let _d = allocator.alloc_space(10).unwrap();

        allocator.free_space(a);
        allocator.free_space(c);

        // Free: [0, 20), [30, 35), [45, 100)
        assert_eq!(allocator.alloc_space(4), Ok(Span::new(30, 4)));
        assert_eq!(allocator.alloc_space(15), Ok(Span::new(0, 15)));
        assert_eq!(allocator.alloc_space(50), Ok(Span::new(45, 50)));
        assert_conserved(&allocator);
    }

    #[test]
    fn ties_go_to_the_first_span() {
        let mut allocator = RowSpaceAllocator::new(40);
        let a = allocator.alloc_space(10).unwrap();
        let _b = allocator.alloc_space(10).unwrap();
        let c = allocator.alloc_space(10).unwrap();
        let _d = allocator.alloc_space(10).unwrap();

        allocator.free_space(c);
        allocator.free_space(a);

        assert_eq!(allocator.alloc_space(10), Ok(Span::new(0, 10)));
    }

    #[test]
    fn freeing_merges_neighbours() {
        let mut allocator = RowSpaceAllocator::new(100);
        let a = allocator.alloc_space(30).unwrap();
        let b = allocator.alloc_space(40).unwrap();
        let c = allocator.alloc_space(20).unwrap();

        allocator.free_space(b);
        assert_eq!(
            allocator.free_spans(),
            &[Span::new(30, 40), Span::new(90, 10)]
        );

        allocator.free_space(a);
        assert_eq!(
            allocator.free_spans(),
            &[Span::new(0, 70), Span::new(90, 10)]
        );
        assert_eq!(allocator.used_spans(), &[c]);

        allocator.free_space(c);
        assert_eq!(allocator.free_spans(), &[Span::new(0, 100)]);
        assert!(allocator.is_empty());
    }

    #[test]
    fn coalescing_is_idempotent() {
        let mut allocator = RowSpaceAllocator::new(256);
        let spans: Vec<Span> = [7, 13, 1, 64, 9, 30, 2, 40]
            .iter()
            .map(|width| allocator.alloc_space(*width).unwrap())
            .collect();

        for index in [1, 5, 3, 0, 7, 2].iter() {
            allocator.free_space(spans[*index]);
            assert_coalesced(&allocator);
            assert_conserved(&allocator);

            let before = allocator.free_spans().to_vec();
            allocator.coalesce();
            assert_eq!(allocator.free_spans(), &before[..]);
        }
    }

    #[test]
    fn has_space_needs_a_single_large_enough_span() {
        let mut allocator = RowSpaceAllocator::new(30);
        let a = allocator.alloc_space(10).unwrap();
        let _b = allocator.alloc_space(10).unwrap();
        let c = allocator.alloc_space(10).unwrap();

        allocator.free_space(a);
        allocator.free_space(c);

        assert_eq!(allocator.available_space(), 20);
        assert!(allocator.has_space(10));
        assert!(!allocator.has_space(20));
        assert_eq!(allocator.alloc_space(20), Err(Error::OutOfSpace));
    }

    #[test]
    #[should_panic]
    #[cfg(debug_assertions)]
    fn freeing_a_foreign_span_asserts() {
        let mut allocator = RowSpaceAllocator::new(30);
        let _a = allocator.alloc_space(10).unwrap();

        allocator.free_space(Span::new(10, 10));
    }
}
