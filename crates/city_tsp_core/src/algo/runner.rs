use std::time::{Duration, Instant};

use rayon::prelude::*;

use crate::{
    Error, Result, Tour,
    algo::{
        Algorithm, BacktrackingConfig, backtracking_with, greedy_edge, nearest_neighbor,
        triangular_approximation,
    },
    graph::CityNetwork,
    options::SolverOptions,
};

/// Solver knobs taken from the command line.
#[derive(Clone, Copy, Debug, Default)]
pub struct SolveConfig {
    pub bound_pruning: bool,
}

impl From<&SolverOptions> for SolveConfig {
    fn from(options: &SolverOptions) -> Self {
        Self {
            bound_pruning: options.bound_pruning,
        }
    }
}

/// Result of one solver run.
#[derive(Clone, Debug)]
pub struct RunReport {
    pub algorithm: Algorithm,
    pub tour: Tour,
    pub elapsed: Duration,
}

/// Dispatches to the solver entry point for `algorithm`.
pub fn solve(network: &mut CityNetwork, algorithm: Algorithm, config: SolveConfig) -> Result<Tour> {
    match algorithm {
        Algorithm::Backtracking => backtracking_with(
            network,
            BacktrackingConfig {
                bound_pruning: config.bound_pruning,
            },
        ),
        Algorithm::Triangular => triangular_approximation(network),
        Algorithm::NearestNeighbor => nearest_neighbor(network),
        Algorithm::GreedyEdge => greedy_edge(network),
    }
}

/// Runs one solver and records its wall time.
pub fn run(network: &mut CityNetwork, algorithm: Algorithm, config: SolveConfig) -> Result<RunReport> {
    log::debug!("runner.run: start algorithm={algorithm}");
    let start = Instant::now();
    let tour = solve(network, algorithm, config)?;
    let elapsed = start.elapsed();

    if tour.is_valid() {
        match tour.check_cycle(network) {
            Ok(()) => log::debug!("runner.run: {algorithm} tour check passed"),
            Err(err) => log::debug!("runner.run: {algorithm} tour check failed: {err}"),
        }
    }
    log::info!(
        "runner.run: done algorithm={algorithm} valid={} distance={} hops={} time={:.3}s",
        tour.is_valid(),
        tour.distance(),
        tour.len(),
        elapsed.as_secs_f64()
    );

    Ok(RunReport {
        algorithm,
        tour,
        elapsed,
    })
}

/// Runs every algorithm in turn on `network`, or with `parallel` on one copy each
/// over a rayon pool. Reports keep the order of `algorithms`.
#[city_tsp_derive::timer("runner")]
pub fn run_all(
    network: &mut CityNetwork,
    algorithms: &[Algorithm],
    config: SolveConfig,
    parallel: bool,
) -> Result<Vec<RunReport>> {
    log::info!(
        "runner: start algorithms={} parallel={parallel} nodes={}",
        algorithms.len(),
        network.node_count()
    );

    if !parallel || algorithms.len() < 2 {
        return algorithms
            .iter()
            .map(|&algorithm| run(network, algorithm, config))
            .collect();
    }

    let shared: &CityNetwork = network;
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(algorithms.len())
        .build()
        .map_err(|e| Error::other(format!("rayon pool: {e}")))?;

    pool.install(|| {
        algorithms
            .par_iter()
            .map(|&algorithm| run(&mut shared.clone(), algorithm, config))
            .collect::<Result<Vec<_>>>()
    })
}
