use std::fmt;

use crate::{
    Error, Result, geo,
    graph::{Edge, Node},
};

/// Dense, symmetric city graph plus the per-solve transient state.
///
/// Node ids index straight into `nodes`; slots for ids that were never added stay
/// `None`. Every present node owns an adjacency row as wide as `nodes`, so edge
/// lookups are O(1) and neighbor scans are O(V).
#[derive(Clone, Debug, Default)]
pub struct CityNetwork {
    nodes: Vec<Option<Node>>,
    node_count: usize,
    edge_count: usize,
    fake_edge_count: usize,
}

impl CityNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.node_count = 0;
        self.edge_count = 0;
        self.fake_edge_count = 0;
    }

    /// Number of present nodes.
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Number of unordered node pairs connected by an input edge.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Number of unordered node pairs filled in by [`CityNetwork::complete_edges`].
    pub fn fake_edge_count(&self) -> usize {
        self.fake_edge_count
    }

    /// Width of the id space: one past the largest id seen.
    pub fn capacity(&self) -> usize {
        self.nodes.len()
    }

    pub fn node_exists(&self, id: usize) -> bool {
        self.nodes.get(id).is_some_and(Option::is_some)
    }

    pub fn node_ids(&self) -> impl Iterator<Item = usize> + '_ {
        self.nodes.iter().flatten().map(|node| node.id)
    }

    /// Tours start and end at the smallest present id.
    pub fn root(&self) -> Option<usize> {
        self.node_ids().next()
    }

    pub fn node(&self, id: usize) -> Result<&Node> {
        self.nodes
            .get(id)
            .and_then(Option::as_ref)
            .ok_or_else(|| Error::range(id, "node lookup"))
    }

    fn node_mut(&mut self, id: usize) -> Result<&mut Node> {
        self.nodes
            .get_mut(id)
            .and_then(Option::as_mut)
            .ok_or_else(|| Error::range(id, "node update"))
    }

    /// Installs `node`, widening every adjacency row when its id extends the id space.
    /// Re-adding an existing id replaces its label and coordinates but keeps its edges.
    pub fn add_node(&mut self, mut node: Node) {
        let id = node.id;
        if id >= self.nodes.len() {
            let capacity = id + 1;
            self.nodes.resize_with(capacity, || None);
            for existing in self.nodes.iter_mut().flatten() {
                existing.resize_row(capacity);
            }
        }

        if let Some(existing) = self.nodes[id].as_mut() {
            log::warn!("network: duplicate node id={id}, keeping latest label/coordinates");
            existing.label = node.label;
            existing.coord = node.coord;
            return;
        }

        node.resize_row(self.nodes.len());
        self.nodes[id] = Some(node);
        self.node_count += 1;
    }

    /// Adds a node with a bare id unless it already exists.
    pub fn ensure_node(&mut self, id: usize) {
        if !self.node_exists(id) {
            self.add_node(Node::new(id));
        }
    }

    pub fn set_label(&mut self, id: usize, label: impl Into<String>) -> Result<()> {
        self.node_mut(id)?.label = Some(label.into());
        Ok(())
    }

    /// Installs an input edge in both directions.
    pub fn add_edge(&mut self, origin: usize, dest: usize, dist: f64) -> Result<()> {
        for id in [origin, dest] {
            if !self.node_exists(id) {
                return Err(Error::range(id, format!("edge {origin} -> {dest}")));
            }
        }
        if origin == dest {
            log::warn!("network: skipping self loop on node={origin}");
            return Ok(());
        }

        let edge = Edge::real(origin, dest, dist);
        let previous = self.set_cell(edge)?;
        self.set_cell(edge.reverse())?;

        match previous {
            Some(old) if old.is_real() => {
                log::warn!("network: duplicate edge {origin} -> {dest}, keeping dist={dist}");
            }
            _ => self.edge_count += 1,
        }
        Ok(())
    }

    fn set_cell(&mut self, edge: Edge) -> Result<Option<Edge>> {
        let dest = edge.dest;
        let node = self.node_mut(edge.origin)?;
        Ok(node.adj[dest].replace(edge))
    }

    /// Fills every still-empty cell between two present nodes: a haversine edge when
    /// both have coordinates, a disconnected edge otherwise.
    ///
    /// Must run once per load, after every input node and edge is installed.
    pub fn complete_edges(&mut self) {
        let ids: Vec<usize> = self.node_ids().collect();
        let mut synthesized = 0usize;
        let mut disconnected = 0usize;

        for (pos, &a) in ids.iter().enumerate() {
            for &b in &ids[pos + 1..] {
                let (Some(Some(node_a)), Some(Some(node_b))) = (self.nodes.get(a), self.nodes.get(b))
                else {
                    continue;
                };
                if node_a.adj[b].is_some() {
                    continue;
                }

                let edge = Edge::synthesized(a, b, geo::distance(node_a.coord, node_b.coord));
                if edge.is_valid() {
                    synthesized += 1;
                } else {
                    disconnected += 1;
                }

                if let Some(Some(node)) = self.nodes.get_mut(a) {
                    node.adj[b] = Some(edge);
                }
                if let Some(Some(node)) = self.nodes.get_mut(b) {
                    node.adj[a] = Some(edge.reverse());
                }
                self.fake_edge_count += 1;
            }
        }

        log::debug!(
            "network.complete: synthesized={synthesized} disconnected={disconnected} fake_total={}",
            self.fake_edge_count
        );
    }

    /// Edge between `a` and `b`; a disconnected edge when the cell was never filled.
    pub fn get_edge(&self, a: usize, b: usize) -> Result<Edge> {
        let node = self.node(a)?;
        if !self.node_exists(b) {
            return Err(Error::range(b, format!("edge lookup {a} -> {b}")));
        }
        Ok(node.adj[b].unwrap_or_else(|| Edge::disconnected(a, b)))
    }

    /// Full adjacency row of `id` in destination-id order, including invalid entries.
    pub fn adjacent(&self, id: usize) -> Result<impl DoubleEndedIterator<Item = Edge> + '_> {
        let node = self.node(id)?;
        Ok(node
            .adj
            .iter()
            .enumerate()
            .map(move |(dest, cell)| cell.unwrap_or_else(|| Edge::disconnected(id, dest))))
    }

    /// Owned copy of [`CityNetwork::adjacent`] for callers that mutate flags while scanning.
    pub fn get_adjacent(&self, id: usize) -> Result<Vec<Edge>> {
        Ok(self.adjacent(id)?.collect())
    }

    pub fn clear_visits(&mut self) {
        for node in self.nodes.iter_mut().flatten() {
            node.visited = false;
        }
    }

    pub fn visit(&mut self, id: usize) -> Result<()> {
        self.node_mut(id)?.visited = true;
        Ok(())
    }

    pub fn unvisit(&mut self, id: usize) -> Result<()> {
        self.node_mut(id)?.visited = false;
        Ok(())
    }

    pub fn is_visited(&self, id: usize) -> Result<bool> {
        Ok(self.node(id)?.visited)
    }

    pub fn clear_prevs(&mut self) {
        for node in self.nodes.iter_mut().flatten() {
            node.prev = None;
        }
    }

    pub fn set_prev(&mut self, id: usize, prev: usize) -> Result<()> {
        if !self.node_exists(prev) {
            return Err(Error::range(prev, format!("parent of node {id}")));
        }
        self.node_mut(id)?.prev = Some(prev);
        Ok(())
    }

    pub fn get_prev(&self, id: usize) -> Result<Option<usize>> {
        Ok(self.node(id)?.prev)
    }

    pub fn clear_uses(&mut self) {
        for node in self.nodes.iter_mut().flatten() {
            node.used.fill(false);
        }
    }

    /// Marks the edge between `a` and `b` as used in both directions.
    pub fn use_edge(&mut self, a: usize, b: usize) -> Result<()> {
        if !self.node_exists(b) {
            return Err(Error::range(b, format!("edge use {a} -> {b}")));
        }
        self.node_mut(a)?.used[b] = true;
        self.node_mut(b)?.used[a] = true;
        Ok(())
    }

    pub fn is_used(&self, a: usize, b: usize) -> Result<bool> {
        let node = self.node(a)?;
        if !self.node_exists(b) {
            return Err(Error::range(b, format!("edge use {a} -> {b}")));
        }
        Ok(node.used[b])
    }
}

impl fmt::Display for CityNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "nodes={} real_edges={} synthesized_edges={}",
            self.node_count, self.edge_count, self.fake_edge_count
        )
    }
}
