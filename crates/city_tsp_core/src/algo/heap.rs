use std::cmp::Ordering;

/// Min-heap entry for `BinaryHeap`: the shortest edge pops first, ties go to the
/// smaller origin and then the smaller destination id.
#[derive(Clone, Copy, Debug)]
pub(crate) struct MinEdge {
    pub(crate) dist: f64,
    pub(crate) origin: usize,
    pub(crate) dest: usize,
}

impl MinEdge {
    pub(crate) fn new(dist: f64, origin: usize, dest: usize) -> Self {
        Self { dist, origin, dest }
    }
}

impl Eq for MinEdge {}
impl PartialEq for MinEdge {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl Ord for MinEdge {
    fn cmp(&self, other: &Self) -> Ordering {
        // reversed: BinaryHeap is a max-heap
        other
            .dist
            .total_cmp(&self.dist)
            .then_with(|| other.origin.cmp(&self.origin))
            .then_with(|| other.dest.cmp(&self.dest))
    }
}
impl PartialOrd for MinEdge {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
