use std::fmt;

use crate::{Error, Result, graph::CityNetwork, graph::Edge};

/// Ordered edge sequence with a running total distance.
///
/// A tour is valid while its distance is finite; solvers return
/// [`Tour::invalid`] when no Hamiltonian cycle was found.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Tour {
    edges: Vec<Edge>,
    distance: f64,
}

impl Tour {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            edges: Vec::with_capacity(capacity),
            distance: 0.0,
        }
    }

    pub fn invalid() -> Self {
        Self {
            edges: Vec::new(),
            distance: f64::INFINITY,
        }
    }

    pub fn push(&mut self, edge: Edge) {
        self.distance += edge.dist;
        self.edges.push(edge);
    }

    pub fn pop(&mut self) -> Option<Edge> {
        let edge = self.edges.pop()?;
        self.distance -= edge.dist;
        Some(edge)
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn last(&self) -> Option<&Edge> {
        self.edges.last()
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn is_valid(&self) -> bool {
        self.distance.is_finite()
    }

    /// Strict comparison: on equal distances the tour found first stays best.
    pub fn is_shorter_than(&self, other: &Self) -> bool {
        self.distance < other.distance
    }

    /// Sum of the edge distances, independent of the running total.
    pub fn edge_sum(&self) -> f64 {
        self.edges.iter().map(|edge| edge.dist).sum()
    }

    /// Visit order: the origin of every hop, starting at the root.
    pub fn stops(&self) -> Vec<usize> {
        self.edges.iter().map(|edge| edge.origin).collect()
    }

    /// Checks that the tour is a closed cycle through every node of `network` exactly once.
    pub fn check_cycle(&self, network: &CityNetwork) -> Result<()> {
        let n = network.node_count();
        if n <= 1 {
            return if self.is_empty() {
                Ok(())
            } else {
                Err(Error::other(format!("{n}-node network needs an empty tour")))
            };
        }
        if self.len() != n {
            return Err(Error::other(format!(
                "tour has {} hops for {n} nodes",
                self.len()
            )));
        }

        let mut seen = vec![false; network.capacity()];
        for (idx, edge) in self.edges.iter().enumerate() {
            let next = &self.edges[(idx + 1) % self.len()];
            if edge.dest != next.origin {
                return Err(Error::other(format!(
                    "hop {idx} ends at {} but hop {} starts at {}",
                    edge.dest,
                    (idx + 1) % self.len(),
                    next.origin
                )));
            }
            let slot = seen
                .get_mut(edge.origin)
                .ok_or_else(|| Error::range(edge.origin, "tour check"))?;
            if *slot {
                return Err(Error::other(format!("node {} visited twice", edge.origin)));
            }
            *slot = true;
        }

        if self.edges.first().map(|edge| edge.origin) != network.root() {
            return Err(Error::other("tour does not start at the root"));
        }
        Ok(())
    }
}

impl fmt::Display for Tour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_valid() {
            return write!(f, "invalid (no tour found)");
        }
        let mut buf = ryu::Buffer::new();
        write!(
            f,
            "distance={} hops={}",
            buf.format(self.distance),
            self.len()
        )?;
        for edge in &self.edges {
            write!(f, "\n\t{edge}")?;
        }
        Ok(())
    }
}
