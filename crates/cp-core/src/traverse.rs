//! Index-based traversal over a grid's backing buffer.
//!
//! A [`Lane`] is an arithmetic run of row-major offsets: a row, a column or
//! the whole buffer. Lanes are validated when the grid builds them; stepping
//! inside a lane is unchecked.

/// Restartable, random-access sequence of buffer offsets.
///
/// # Example
/// ```
/// use cp_core::grid::Grid;
/// let grid = Grid::new(3, 2, '.').unwrap();
/// let lane = grid.column_lane(1, 0).unwrap();
/// assert_eq!(lane.len(), 2);
/// assert_eq!(lane.iter().collect::<Vec<_>>(), vec![1, 4]);
/// assert_eq!(lane.index(1), 4);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Lane {
    start: usize,
    stride: usize,
    len: usize,
}

impl Lane {
    pub(crate) fn new(start: usize, stride: usize, len: usize) -> Self {
        debug_assert!(stride >= 1);
        Self { start, stride, len }
    }

    /// First offset.
    #[must_use]
    pub fn start(&self) -> usize {
        self.start
    }

    /// Distance between consecutive offsets.
    #[must_use]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Number of offsets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// True for a lane positioned one past the end.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Offset of the `n`-th element. `n == len()` is the end position.
    #[inline(always)]
    #[must_use]
    pub fn index(&self, n: usize) -> usize {
        debug_assert!(n <= self.len, "lane step out of range");
        self.start + n * self.stride
    }

    /// Same lane with its first `n` elements dropped.
    #[must_use]
    pub fn advance(&self, n: usize) -> Self {
        let n = n.min(self.len);
        Self {
            start: self.index(n),
            stride: self.stride,
            len: self.len - n,
        }
    }

    /// Offsets in order. Each call restarts from the beginning.
    #[must_use]
    pub fn iter(&self) -> LaneIter {
        LaneIter {
            lane: *self,
            front: 0,
            back: self.len,
        }
    }
}

impl IntoIterator for Lane {
    type Item = usize;
    type IntoIter = LaneIter;

    fn into_iter(self) -> LaneIter {
        self.iter()
    }
}

/// Iterator over a [`Lane`].
#[derive(Clone, Debug)]
pub struct LaneIter {
    lane: Lane,
    front: usize,
    back: usize,
}

impl Iterator for LaneIter {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.front >= self.back {
            return None;
        }
        let idx = self.lane.index(self.front);
        self.front += 1;
        Some(idx)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.back - self.front;
        (n, Some(n))
    }

    fn nth(&mut self, n: usize) -> Option<usize> {
        self.front = self.front.saturating_add(n).min(self.back);
        self.next()
    }
}

impl DoubleEndedIterator for LaneIter {
    fn next_back(&mut self) -> Option<usize> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        Some(self.lane.index(self.back))
    }
}

impl ExactSizeIterator for LaneIter {}
