//! City-network travelling salesman toolkit: a dense symmetric graph store loaded
//! from CSV, an exact backtracking solver and three approximations (MST preorder,
//! nearest neighbor, greedy edge).

pub mod algo;
mod error;
pub mod geo;
pub mod graph;
mod io;
pub mod logging;
pub mod report;
mod tour;

pub use io::{csv, dataset, options};

pub use algo::{
    Algorithm, AlgorithmSelection, BacktrackingConfig, backtracking, backtracking_with,
    greedy_edge, nearest_neighbor,
    runner::{RunReport, SolveConfig, run, run_all, solve},
    triangular_approximation,
};
pub use dataset::DatasetSource;
pub use error::{Error, Result};
pub use graph::{CityNetwork, Edge, EdgeKind, Node};
pub use options::SolverOptions;
pub use report::Report;
pub use tour::Tour;
