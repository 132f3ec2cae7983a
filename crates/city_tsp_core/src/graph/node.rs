use crate::{geo::GeoPoint, graph::Edge};

/// A city/station plus its adjacency row and the transient flags solvers use.
#[derive(Clone, Debug)]
pub struct Node {
    pub(crate) id: usize,
    pub(crate) label: Option<String>,
    pub(crate) coord: Option<GeoPoint>,
    pub(crate) visited: bool,
    pub(crate) prev: Option<usize>,
    /// Indexed by destination id; `None` until an edge is installed or completed.
    pub(crate) adj: Vec<Option<Edge>>,
    pub(crate) used: Vec<bool>,
}

impl Node {
    pub fn new(id: usize) -> Self {
        Self {
            id,
            label: None,
            coord: None,
            visited: false,
            prev: None,
            adj: Vec::new(),
            used: Vec::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_coord(mut self, coord: GeoPoint) -> Self {
        self.coord = Some(coord);
        self
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn coord(&self) -> Option<GeoPoint> {
        self.coord
    }

    pub(crate) fn resize_row(&mut self, capacity: usize) {
        self.adj.resize(capacity, None);
        self.used.resize(capacity, false);
    }
}
