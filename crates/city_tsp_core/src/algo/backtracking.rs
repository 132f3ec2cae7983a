use crate::{Result, Tour, algo::degenerate_tour, graph::CityNetwork};

/// Knobs for [`backtracking_with`].
#[derive(Clone, Copy, Debug, Default)]
pub struct BacktrackingConfig {
    /// Abandon partial tours that are already no shorter than the best complete one.
    /// Distances are non-negative, so the returned tour is the same either way.
    pub bound_pruning: bool,
}

/// Exact tour over input edges only, by exhaustive depth-first search from the root.
///
/// Runs in O((V - 1)!) time in the worst case.
pub fn backtracking(network: &mut CityNetwork) -> Result<Tour> {
    backtracking_with(network, BacktrackingConfig::default())
}

pub fn backtracking_with(network: &mut CityNetwork, config: BacktrackingConfig) -> Result<Tour> {
    if let Some(tour) = degenerate_tour(network) {
        return Ok(tour);
    }
    let Some(root) = network.root() else {
        return Ok(Tour::invalid());
    };

    let n = network.node_count();
    network.clear_visits();
    network.visit(root)?;

    let mut search = Search {
        network: &mut *network,
        root,
        target_len: n - 1,
        bound_pruning: config.bound_pruning,
        current: Tour::with_capacity(n),
        best: Tour::invalid(),
        completed: 0,
        pruned: 0,
    };
    search.extend(root)?;

    log::debug!(
        "backtracking: n={n} completed_cycles={} pruned={} best_valid={}",
        search.completed,
        search.pruned,
        search.best.is_valid()
    );

    let best = search.best;
    network.clear_visits();
    Ok(best)
}

struct Search<'a> {
    network: &'a mut CityNetwork,
    root: usize,
    target_len: usize,
    bound_pruning: bool,
    current: Tour,
    best: Tour,
    completed: u64,
    pruned: u64,
}

impl Search<'_> {
    fn extend(&mut self, node: usize) -> Result<()> {
        if self.current.len() == self.target_len {
            return self.close(node);
        }
        if self.bound_pruning && !self.current.is_shorter_than(&self.best) {
            self.pruned += 1;
            return Ok(());
        }

        for edge in self.network.get_adjacent(node)? {
            if !edge.is_real() || !edge.is_valid() || self.network.is_visited(edge.dest)? {
                continue;
            }

            self.network.visit(edge.dest)?;
            self.current.push(edge);
            self.extend(edge.dest)?;
            self.current.pop();
            self.network.unvisit(edge.dest)?;
        }
        Ok(())
    }

    fn close(&mut self, node: usize) -> Result<()> {
        let closing = self.network.get_edge(node, self.root)?;
        if !closing.is_real() || !closing.is_valid() {
            return Ok(());
        }

        self.current.push(closing);
        self.completed += 1;
        if self.current.is_shorter_than(&self.best) {
            self.best = self.current.clone();
        }
        self.current.pop();
        Ok(())
    }
}
