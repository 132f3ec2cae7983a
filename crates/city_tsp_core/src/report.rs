//! Plain-text run report: one network summary line, then one block per solver run.

use std::fmt;

use crate::{Tour, algo::runner::RunReport, graph::CityNetwork, graph::Edge};

/// Borrowed view over a finished run, rendered through `Display`.
pub struct Report<'a> {
    network: &'a CityNetwork,
    runs: &'a [RunReport],
    full_path: bool,
}

impl<'a> Report<'a> {
    pub fn new(network: &'a CityNetwork, runs: &'a [RunReport]) -> Self {
        Self {
            network,
            runs,
            full_path: true,
        }
    }

    pub fn full_path(mut self, full_path: bool) -> Self {
        self.full_path = full_path;
        self
    }

    /// Shortest valid tour across the runs; the earliest run wins ties.
    pub fn best(&self) -> Option<&RunReport> {
        self.runs
            .iter()
            .filter(|run| run.tour.is_valid())
            .fold(None, |best: Option<&RunReport>, run| match best {
                Some(current) if !run.tour.is_shorter_than(&current.tour) => Some(current),
                _ => Some(run),
            })
    }

    fn write_tour(&self, f: &mut fmt::Formatter<'_>, tour: &Tour) -> fmt::Result {
        if !tour.is_valid() {
            return writeln!(f, "\tinvalid (no tour found)");
        }
        let mut buf = ryu::Buffer::new();
        writeln!(
            f,
            "\tdistance={} hops={}",
            buf.format(tour.distance()),
            tour.len()
        )?;
        if self.full_path {
            for edge in tour.edges() {
                self.write_hop(f, edge)?;
            }
        }
        Ok(())
    }

    fn write_hop(&self, f: &mut fmt::Formatter<'_>, edge: &Edge) -> fmt::Result {
        write!(f, "\t\t{edge}")?;
        if let (Some(from), Some(to)) = (self.label(edge.origin), self.label(edge.dest)) {
            write!(f, " [{from} -> {to}]")?;
        }
        if !edge.is_real() && edge.is_valid() {
            f.write_str(" *")?;
        }
        writeln!(f)
    }

    fn label(&self, id: usize) -> Option<&str> {
        self.network.node(id).ok().and_then(|node| node.label())
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "network: {}", self.network)?;
        for run in self.runs {
            writeln!(f, "[{}]", run.algorithm)?;
            self.write_tour(f, &run.tour)?;
            writeln!(f, "\ttime={:.6}s", run.elapsed.as_secs_f64())?;
        }
        if self.runs.len() > 1 {
            match self.best() {
                Some(best) => {
                    let mut buf = ryu::Buffer::new();
                    writeln!(
                        f,
                        "best: {} distance={}",
                        best.algorithm,
                        buf.format(best.tour.distance())
                    )?;
                }
                None => writeln!(f, "best: none (no solver found a tour)")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::Report;
    use crate::{
        Tour,
        algo::{Algorithm, runner::RunReport},
        graph::{CityNetwork, Edge, Node},
    };

    fn labeled_triangle() -> CityNetwork {
        let mut network = CityNetwork::new();
        for (id, label) in [(0, "museu"), (1, "estadio"), (2, "ponte")] {
            network.add_node(Node::new(id).with_label(label));
        }
        network.add_edge(0, 1, 1.5).expect("edge");
        network.add_edge(1, 2, 2.0).expect("edge");
        network.add_edge(2, 0, 3.0).expect("edge");
        network.complete_edges();
        network
    }

    fn triangle_tour() -> Tour {
        let mut tour = Tour::new();
        tour.push(Edge::real(0, 1, 1.5));
        tour.push(Edge::real(1, 2, 2.0));
        tour.push(Edge::real(2, 0, 3.0));
        tour
    }

    fn run(algorithm: Algorithm, tour: Tour) -> RunReport {
        RunReport {
            algorithm,
            tour,
            elapsed: Duration::from_millis(2),
        }
    }

    #[test]
    fn renders_summary_hops_and_time() {
        let network = labeled_triangle();
        let runs = vec![run(Algorithm::Backtracking, triangle_tour())];
        let text = Report::new(&network, &runs).to_string();

        assert!(text.starts_with("network: nodes=3 real_edges=3 synthesized_edges=0\n"));
        assert!(text.contains("[backtracking]\n\tdistance=6.5 hops=3\n"));
        assert!(text.contains("\t\t0 -> 1 (1.5) [museu -> estadio]\n"));
        assert!(text.contains("\ttime=0.002000s\n"));
        assert!(!text.contains("best:"));
    }

    #[test]
    fn synthesized_hops_are_starred() {
        let mut network = CityNetwork::new();
        network.add_node(Node::new(0));
        network.add_node(Node::new(1));
        network.add_edge(0, 1, 2.0).expect("edge");
        network.complete_edges();

        let mut tour = Tour::new();
        tour.push(Edge::real(0, 1, 2.0));
        tour.push(Edge::synthesized(1, 0, 2.0));
        let runs = vec![run(Algorithm::NearestNeighbor, tour)];
        let text = Report::new(&network, &runs).to_string();

        assert!(text.contains("\t\t0 -> 1 (2.0)\n"));
        assert!(text.contains("\t\t1 -> 0 (2.0) *\n"));
    }

    #[test]
    fn summary_only_without_full_path() {
        let network = labeled_triangle();
        let runs = vec![run(Algorithm::GreedyEdge, triangle_tour())];
        let text = Report::new(&network, &runs).full_path(false).to_string();

        assert!(text.contains("distance=6.5 hops=3"));
        assert!(!text.contains("->"));
    }

    #[test]
    fn marks_invalid_tours_and_picks_the_best_valid_run() {
        let network = labeled_triangle();
        let runs = vec![
            run(Algorithm::Backtracking, Tour::invalid()),
            run(Algorithm::Triangular, triangle_tour()),
            run(Algorithm::NearestNeighbor, triangle_tour()),
        ];
        let report = Report::new(&network, &runs);
        let text = report.to_string();

        assert!(text.contains("[backtracking]\n\tinvalid (no tour found)\n"));
        assert_eq!(
            report.best().map(|best| best.algorithm),
            Some(Algorithm::Triangular)
        );
        assert!(text.contains("best: triangular distance=6.5\n"));
    }

    #[test]
    fn no_valid_run_is_reported_as_such() {
        let network = CityNetwork::new();
        let runs = vec![
            run(Algorithm::Backtracking, Tour::invalid()),
            run(Algorithm::GreedyEdge, Tour::invalid()),
        ];
        let text = Report::new(&network, &runs).to_string();
        assert!(text.contains("best: none"));
    }
}
