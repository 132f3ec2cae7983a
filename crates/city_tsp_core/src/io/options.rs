use std::{env, path::Path};

use city_tsp_derive::{CliOptions, CliValue, KvDisplay};
use log::LevelFilter;

use crate::{Error, Result, algo::AlgorithmSelection};

/// Command-line options for one `city-tsp` run.
#[derive(Clone, Debug, CliOptions, KvDisplay)]
pub struct SolverOptions {
    /// Dataset directory (`nodes.csv` + `edges.csv`) or a single `.csv` edge table.
    #[cli(long = "dataset")]
    #[kv(fmt = "or_dash")]
    pub dataset: String,
    /// Solver to run, `heuristics` (everything but the exact search) or `all`.
    #[cli(long = "algorithm", parse_with = "AlgorithmSelection::parse")]
    pub algorithm: AlgorithmSelection,
    /// Let the exact solver abandon partial tours that cannot beat the best one.
    #[cli(long = "bound-pruning", flag)]
    pub bound_pruning: bool,
    /// Print every hop of each tour, not just the summary line.
    #[cli(long = "full-path", flag)]
    pub full_path: bool,
    /// Run the selected solvers concurrently, each on its own copy of the network.
    #[cli(long = "parallel", flag)]
    pub parallel: bool,
    #[cli(long = "log-level", parse_with = "LogLevel::parse")]
    pub log_level: LogLevel,
    #[cli(long = "log-format", parse_with = "LogFormat::parse")]
    pub log_format: LogFormat,
    #[cli(long = "log-timestamp", flag)]
    pub log_timestamp: bool,
    /// Log file path. Empty means stderr.
    #[cli(long = "log-output")]
    #[kv(fmt = "or_dash")]
    pub log_output: String,
    /// Report file path. Empty means stdout.
    #[cli(long = "output")]
    #[kv(fmt = "or_dash")]
    pub output: String,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, CliValue)]
#[cli_value(option = "log-level")]
pub enum LogLevel {
    Error,
    #[cli(alias = "warning")]
    Warn,
    Info,
    Debug,
    Trace,
    Off,
}

impl LogLevel {
    pub fn to_filter(self) -> LevelFilter {
        match self {
            Self::Error => LevelFilter::Error,
            Self::Warn => LevelFilter::Warn,
            Self::Info => LevelFilter::Info,
            Self::Debug => LevelFilter::Debug,
            Self::Trace => LevelFilter::Trace,
            Self::Off => LevelFilter::Off,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, CliValue)]
#[cli_value(option = "log-format")]
pub enum LogFormat {
    Compact,
    Pretty,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            dataset: String::new(),
            algorithm: AlgorithmSelection::Heuristics,
            bound_pruning: false,
            full_path: true,
            parallel: false,
            log_level: LogLevel::Warn,
            log_format: LogFormat::Compact,
            log_timestamp: true,
            log_output: String::new(),
            output: String::new(),
        }
    }
}

impl SolverOptions {
    pub fn from_args() -> Result<Self> {
        Self::parse_from_iter(env::args().skip(1))
    }

    pub fn parse_from_iter<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut options = Self::default();
        let mut args = args
            .into_iter()
            .map(|arg| arg.as_ref().to_owned())
            .peekable();

        while let Some(arg) = args.next() {
            if arg == "--help" || arg == "-h" {
                return Err(Error::invalid_input(Self::usage()));
            }

            let Some(raw_name) = arg.strip_prefix("--") else {
                return Err(Error::invalid_input(format!(
                    "Unexpected argument: {arg}\n\n{}",
                    Self::usage()
                )));
            };

            if raw_name.is_empty() {
                return Err(Error::invalid_input(format!(
                    "Invalid option name: {arg}\n\n{}",
                    Self::usage()
                )));
            }

            let (name, value) = Self::split_arg(raw_name, &mut args);
            if !options.apply_cli_option(&name, value)? {
                return Err(Error::invalid_input(format!(
                    "Unknown option: --{name}\n\n{}",
                    Self::usage()
                )));
            }
        }

        Ok(options)
    }

    pub fn usage() -> &'static str {
        concat!(
            "Usage:\n",
            "  city-tsp --dataset <dir|file.csv> [options]\n\n",
            "Options:\n",
            "  --dataset <path>           directory with nodes.csv + edges.csv, or one .csv edge table\n",
            "  --algorithm <backtracking|triangular|nearest-neighbor|greedy-edge|heuristics|all>\n",
            "                             (default: heuristics; backtracking is factorial time)\n",
            "  --bound-pruning[=<bool>]   (default: false)\n",
            "  --full-path[=<bool>]       (default: true)\n",
            "  --no-full-path\n",
            "  --parallel[=<bool>]        (default: false)\n",
            "  --log-level <error|warn|info|debug|trace|off>  (default: warn)\n",
            "  --log-format <compact|pretty>  (default: compact)\n",
            "  --log-timestamp[=<bool>]   (default: true)\n",
            "  --no-log-timestamp\n",
            "  --log-output <path>        (default: stderr)\n",
            "  --output <path>            (default: stdout)\n",
            "  --help\n",
            "\n",
            "Examples:\n",
            "  city-tsp --dataset data/stations --algorithm backtracking\n",
            "  city-tsp --dataset data/tourism_12.csv --algorithm all --parallel --no-full-path\n",
            "  city-tsp --dataset data/stations --no-full-path\n",
            "  city-tsp --dataset=data/shipping.csv --algorithm=mst --log-level=info --output report.txt\n",
        )
    }

    pub fn log_output_path(&self) -> Option<&Path> {
        non_stdio_path(&self.log_output)
    }

    pub fn output_path(&self) -> Option<&Path> {
        non_stdio_path(&self.output)
    }
}

fn non_stdio_path(raw: &str) -> Option<&Path> {
    let raw = raw.trim();
    if raw.is_empty() || raw == "-" {
        None
    } else {
        Some(Path::new(raw))
    }
}
