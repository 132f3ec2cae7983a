use std::collections::BinaryHeap;

use crate::{
    Result, Tour,
    algo::{degenerate_tour, heap::MinEdge},
    graph::CityNetwork,
};

/// MST preorder tour: at most twice the optimum when distances obey the triangle
/// inequality.
///
/// The tree uses input edges only; hops between consecutive preorder stops may use
/// synthesized edges. O(E log V) for the tree, O(V^2) for the preorder walk.
pub fn triangular_approximation(network: &mut CityNetwork) -> Result<Tour> {
    if let Some(tour) = degenerate_tour(network) {
        return Ok(tour);
    }
    let Some(root) = network.root() else {
        return Ok(Tour::invalid());
    };

    let tree_size = calc_mst(network, root)?;
    let n = network.node_count();
    if tree_size < n {
        log::debug!("triangular: spanning tree reached {tree_size}/{n} nodes");
        return Ok(Tour::invalid());
    }

    let order = preorder(network, root)?;
    let mut tour = Tour::with_capacity(order.len());
    for (idx, &from) in order.iter().enumerate() {
        let to = order[(idx + 1) % order.len()];
        let edge = network.get_edge(from, to)?;
        if !edge.is_valid() {
            log::debug!("triangular: no edge for hop {from} -> {to}");
            return Ok(Tour::invalid());
        }
        tour.push(edge);
    }
    Ok(tour)
}

/// Lazy Prim from `root` over real edges. Leaves every reached node visited with its
/// tree parent in `prev` (the root is its own parent) and returns the reached count.
pub(crate) fn calc_mst(network: &mut CityNetwork, root: usize) -> Result<usize> {
    network.clear_visits();
    network.clear_prevs();

    let mut heap = BinaryHeap::new();
    heap.push(MinEdge::new(0.0, root, root));
    let mut reached = 0usize;
    let mut weight = 0.0;

    while let Some(candidate) = heap.pop() {
        let node = candidate.dest;
        if network.is_visited(node)? {
            continue;
        }
        network.visit(node)?;
        network.set_prev(node, candidate.origin)?;
        reached += 1;
        weight += candidate.dist;

        for edge in network.adjacent(node)? {
            if edge.is_real() && edge.is_valid() && !network.is_visited(edge.dest)? {
                heap.push(MinEdge::new(edge.dist, node, edge.dest));
            }
        }
    }

    log::debug!("triangular.mst: reached={reached} weight={weight}");
    Ok(reached)
}

/// Depth-first preorder of the tree stored in `prev`, smallest child id first.
fn preorder(network: &CityNetwork, root: usize) -> Result<Vec<usize>> {
    let mut order = Vec::with_capacity(network.node_count());
    let mut stack = vec![root];

    while let Some(node) = stack.pop() {
        order.push(node);
        for edge in network.adjacent(node)?.rev() {
            let child = edge.dest;
            if child == node || child == root || !network.node_exists(child) {
                continue;
            }
            if network.get_prev(child)? == Some(node) {
                stack.push(child);
            }
        }
    }
    Ok(order)
}
