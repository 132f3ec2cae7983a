//! Tour solvers. Every entry point takes the network by `&mut`, clears the transient
//! flags it relies on, and returns [`Tour::invalid`] when no tour exists.

pub mod backtracking;
pub mod greedy_edge;
mod heap;
pub mod nearest_neighbor;
pub mod runner;
pub mod triangular;

use city_tsp_derive::CliValue;

use crate::{Tour, graph::CityNetwork};

pub use backtracking::{BacktrackingConfig, backtracking, backtracking_with};
pub use greedy_edge::greedy_edge;
pub use nearest_neighbor::nearest_neighbor;
pub use triangular::triangular_approximation;

/// Shared answer for graphs too small to search: no nodes has no tour, a single
/// node is a valid empty tour of length zero.
pub(crate) fn degenerate_tour(network: &CityNetwork) -> Option<Tour> {
    match network.node_count() {
        0 => Some(Tour::invalid()),
        1 => Some(Tour::new()),
        _ => None,
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, CliValue)]
#[cli_value(option = "algorithm")]
pub enum Algorithm {
    Backtracking,
    #[cli(alias = "mst")]
    #[cli(alias = "triangular-approximation")]
    Triangular,
    #[cli(alias = "nn")]
    NearestNeighbor,
    #[cli(alias = "greedy")]
    GreedyEdge,
}

/// What `--algorithm` selects: one solver, the three approximations, or all four.
#[derive(Clone, Copy, Debug, Eq, PartialEq, CliValue)]
#[cli_value(option = "algorithm")]
pub enum AlgorithmSelection {
    Backtracking,
    #[cli(alias = "mst")]
    #[cli(alias = "triangular-approximation")]
    Triangular,
    #[cli(alias = "nn")]
    NearestNeighbor,
    #[cli(alias = "greedy")]
    GreedyEdge,
    Heuristics,
    All,
}

impl AlgorithmSelection {
    pub fn algorithms(self) -> Vec<Algorithm> {
        match self {
            Self::Backtracking => vec![Algorithm::Backtracking],
            Self::Triangular => vec![Algorithm::Triangular],
            Self::NearestNeighbor => vec![Algorithm::NearestNeighbor],
            Self::GreedyEdge => vec![Algorithm::GreedyEdge],
            Self::Heuristics => vec![
                Algorithm::Triangular,
                Algorithm::NearestNeighbor,
                Algorithm::GreedyEdge,
            ],
            Self::All => Algorithm::VARIANTS.to_vec(),
        }
    }
}
