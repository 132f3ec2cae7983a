use std::{fs, process::ExitCode, time::Instant};

use log::info;

use city_tsp_core::{
    DatasetSource, Report, Result, SolveConfig, SolverOptions, logging, run_all,
};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let now = Instant::now();
    let options = SolverOptions::from_args()?;
    logging::init_logger(&options)?;
    info!("options: {options}");

    let source = DatasetSource::resolve(&options.dataset)?;
    info!("dataset: {source}");
    let mut network = source.load()?;

    let algorithms = options.algorithm.algorithms();
    let runs = run_all(
        &mut network,
        &algorithms,
        SolveConfig::from(&options),
        options.parallel,
    )?;

    let report = Report::new(&network, &runs)
        .full_path(options.full_path)
        .to_string();
    match options.output_path() {
        Some(path) => fs::write(path, &report)?,
        None => print!("{report}"),
    }

    info!(
        "output: runs={} time={:.2}s",
        runs.len(),
        now.elapsed().as_secs_f32()
    );

    Ok(())
}
