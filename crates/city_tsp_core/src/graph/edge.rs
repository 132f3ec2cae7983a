use std::fmt;

/// Where an adjacency entry came from.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EdgeKind {
    /// Given by the input dataset.
    Real,
    /// Filled in by edge completion from node coordinates.
    Synthesized,
    /// No connection between the two nodes.
    Disconnected,
}

/// Undirected connection seen from `origin`; the reverse direction lives in `dest`'s row.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    pub origin: usize,
    pub dest: usize,
    pub dist: f64,
    pub kind: EdgeKind,
}

impl Edge {
    pub fn real(origin: usize, dest: usize, dist: f64) -> Self {
        Self {
            origin,
            dest,
            dist,
            kind: EdgeKind::Real,
        }
    }

    /// A synthesized edge without a finite distance degrades to a disconnected one.
    pub fn synthesized(origin: usize, dest: usize, dist: f64) -> Self {
        if !dist.is_finite() {
            return Self::disconnected(origin, dest);
        }
        Self {
            origin,
            dest,
            dist,
            kind: EdgeKind::Synthesized,
        }
    }

    pub fn disconnected(origin: usize, dest: usize) -> Self {
        Self {
            origin,
            dest,
            dist: f64::INFINITY,
            kind: EdgeKind::Disconnected,
        }
    }

    pub fn is_real(&self) -> bool {
        self.kind == EdgeKind::Real
    }

    pub fn is_valid(&self) -> bool {
        self.kind != EdgeKind::Disconnected && self.dist.is_finite()
    }

    pub fn reverse(&self) -> Self {
        Self {
            origin: self.dest,
            dest: self.origin,
            ..*self
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_valid() {
            return write!(f, "{} -> {} (no connection)", self.origin, self.dest);
        }
        let mut buf = ryu::Buffer::new();
        write!(f, "{} -> {} ({})", self.origin, self.dest, buf.format(self.dist))
    }
}

#[cfg(test)]
mod tests {
    use super::{Edge, EdgeKind};

    #[test]
    fn reverse_swaps_endpoints_and_keeps_distance_and_kind() {
        let edge = Edge::real(3, 7, 12.5);
        let rev = edge.reverse();

        assert_eq!((rev.origin, rev.dest), (7, 3));
        assert_eq!(rev.dist, 12.5);
        assert_eq!(rev.kind, EdgeKind::Real);
        assert_eq!(rev.reverse(), edge);
    }

    #[test]
    fn synthesized_without_distance_is_disconnected() {
        let edge = Edge::synthesized(0, 1, f64::INFINITY);
        assert_eq!(edge.kind, EdgeKind::Disconnected);
        assert!(!edge.is_valid());
        assert!(!edge.is_real());
    }

    #[test]
    fn validity_and_realness_follow_kind() {
        assert!(Edge::real(0, 1, 1.0).is_valid());
        assert!(Edge::real(0, 1, 1.0).is_real());
        assert!(Edge::synthesized(0, 1, 1.0).is_valid());
        assert!(!Edge::synthesized(0, 1, 1.0).is_real());
        assert!(!Edge::disconnected(0, 1).is_valid());
        assert!(Edge::disconnected(0, 1).dist.is_infinite());
    }

    #[test]
    fn display_shows_hop_and_distance() {
        assert_eq!(Edge::real(1, 2, 3.5).to_string(), "1 -> 2 (3.5)");
        assert_eq!(
            Edge::disconnected(1, 2).to_string(),
            "1 -> 2 (no connection)"
        );
    }
}
