use crate::{Result, Tour, algo::degenerate_tour, graph::CityNetwork, graph::Edge};

/// Greedy walk from the root: always take the shortest valid edge to an unvisited node,
/// then close back to the root.
///
/// Synthesized edges count. Ties go to the smallest destination id. O(V^2).
pub fn nearest_neighbor(network: &mut CityNetwork) -> Result<Tour> {
    if let Some(tour) = degenerate_tour(network) {
        return Ok(tour);
    }
    let Some(root) = network.root() else {
        return Ok(Tour::invalid());
    };

    let n = network.node_count();
    network.clear_visits();
    network.visit(root)?;

    let mut tour = Tour::with_capacity(n);
    let mut current = root;
    while tour.len() < n - 1 {
        let Some(next) = closest_unvisited(network, current)? else {
            log::debug!(
                "nearest_neighbor: stuck at node {current} after {} hops",
                tour.len()
            );
            network.clear_visits();
            return Ok(Tour::invalid());
        };
        network.visit(next.dest)?;
        tour.push(next);
        current = next.dest;
    }

    let closing = network.get_edge(current, root)?;
    network.clear_visits();
    if !closing.is_valid() {
        log::debug!("nearest_neighbor: no edge back to root from {current}");
        return Ok(Tour::invalid());
    }
    tour.push(closing);
    Ok(tour)
}

fn closest_unvisited(network: &CityNetwork, node: usize) -> Result<Option<Edge>> {
    let mut best: Option<Edge> = None;
    for edge in network.adjacent(node)? {
        if !edge.is_valid() || network.is_visited(edge.dest)? {
            continue;
        }
        if best.is_none_or(|current| edge.dist < current.dist) {
            best = Some(edge);
        }
    }
    Ok(best)
}
