use std::collections::BinaryHeap;

use petgraph::unionfind::UnionFind;

use crate::{
    Result, Tour,
    algo::{degenerate_tour, heap::MinEdge},
    graph::CityNetwork,
};

/// Global cheapest-edge construction: accept edges shortest first while no node
/// exceeds degree 2 and no cycle closes before the last edge, then walk the result
/// from the root.
///
/// Synthesized edges count. O(V^2 log V).
pub fn greedy_edge(network: &mut CityNetwork) -> Result<Tour> {
    if let Some(tour) = degenerate_tour(network) {
        return Ok(tour);
    }
    let Some(root) = network.root() else {
        return Ok(Tour::invalid());
    };

    if network.node_count() == 2 {
        return there_and_back(network, root);
    }

    if !select_edges(network)? {
        network.clear_uses();
        return Ok(Tour::invalid());
    }
    let tour = reconstruct(network, root)?;
    network.clear_uses();
    Ok(tour)
}

/// One edge cannot give two nodes degree 2, so two-node graphs are closed directly.
fn there_and_back(network: &CityNetwork, root: usize) -> Result<Tour> {
    let Some(other) = network.node_ids().find(|&id| id != root) else {
        return Ok(Tour::invalid());
    };
    let out = network.get_edge(root, other)?;
    if !out.is_valid() {
        return Ok(Tour::invalid());
    }
    let mut tour = Tour::with_capacity(2);
    tour.push(out);
    tour.push(out.reverse());
    Ok(tour)
}

/// Marks the accepted edges as `used`. Returns whether every node reached degree 2.
pub(crate) fn select_edges(network: &mut CityNetwork) -> Result<bool> {
    network.clear_uses();

    let ids: Vec<usize> = network.node_ids().collect();
    let mut heap = BinaryHeap::new();
    for &a in &ids {
        for edge in network.adjacent(a)? {
            if edge.dest > a && edge.is_valid() && network.node_exists(edge.dest) {
                heap.push(MinEdge::new(edge.dist, a, edge.dest));
            }
        }
    }

    let mut degree = vec![0u8; network.capacity()];
    let mut components = UnionFind::<usize>::new(network.capacity());
    let mut unfinished = ids.len();
    let mut accepted = 0usize;

    while unfinished > 0 {
        let Some(candidate) = heap.pop() else {
            log::debug!(
                "greedy_edge: candidates exhausted with {unfinished} nodes below degree 2"
            );
            return Ok(false);
        };
        let (a, b) = (candidate.origin, candidate.dest);
        if degree[a] == 2 || degree[b] == 2 {
            continue;
        }
        if components.find_mut(a) == components.find_mut(b) && unfinished != 2 {
            continue;
        }

        components.union(a, b);
        network.use_edge(a, b)?;
        accepted += 1;
        for end in [a, b] {
            degree[end] += 1;
            if degree[end] == 2 {
                unfinished -= 1;
            }
        }
    }

    log::debug!("greedy_edge: accepted={accepted}");
    Ok(true)
}

/// Follows `used` edges from the root to unvisited neighbors, then closes the cycle.
fn reconstruct(network: &mut CityNetwork, root: usize) -> Result<Tour> {
    let n = network.node_count();
    network.clear_visits();
    network.visit(root)?;

    let mut tour = Tour::with_capacity(n);
    let mut current = root;
    while tour.len() < n - 1 {
        let mut next = None;
        for edge in network.adjacent(current)? {
            if network.node_exists(edge.dest)
                && network.is_used(current, edge.dest)?
                && !network.is_visited(edge.dest)?
            {
                next = Some(edge);
                break;
            }
        }
        let Some(edge) = next else {
            network.clear_visits();
            return Ok(Tour::invalid());
        };
        network.visit(edge.dest)?;
        tour.push(edge);
        current = edge.dest;
    }

    let closing = network.get_edge(current, root)?;
    network.clear_visits();
    if !closing.is_valid() || !network.is_used(current, root)? {
        return Ok(Tour::invalid());
    }
    tour.push(closing);
    Ok(tour)
}
