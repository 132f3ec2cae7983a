use std::{
    fs::File,
    io::{self, Write},
};

use env_logger::{Builder, Target, WriteStyle, fmt::Formatter};
use log::{Level, Record};

use crate::options::{LogFormat, SolverOptions};
use crate::{Error, Result};

/// Installs the global `env_logger` backend configured from `options`.
///
/// Fails when the log file cannot be created or a logger is already installed.
pub fn init_logger(options: &SolverOptions) -> Result<()> {
    let style = LineStyle {
        format: options.log_format,
        timestamp: options.log_timestamp,
    };

    Builder::new()
        .filter_level(options.log_level.to_filter())
        .write_style(WriteStyle::Never)
        .format(move |buf, record| style.write(buf, record))
        .target(log_target(options)?)
        .try_init()
        .map_err(|e| Error::other(format!("logger init failed: {e}")))
}

#[derive(Clone, Copy)]
struct LineStyle {
    format: LogFormat,
    timestamp: bool,
}

impl LineStyle {
    fn write(self, buf: &mut Formatter, record: &Record<'_>) -> io::Result<()> {
        if self.timestamp {
            write!(buf, "{} ", buf.timestamp_millis())?;
        }
        let tag = level_tag(record.level());
        match self.format {
            LogFormat::Compact => writeln!(buf, "{tag} {}", record.args()),
            LogFormat::Pretty => writeln!(buf, "{tag:<5} [{}] {}", record.target(), record.args()),
        }
    }
}

/// Log file from `--log-output`, stderr otherwise.
fn log_target(options: &SolverOptions) -> Result<Target> {
    let Some(path) = options.log_output_path() else {
        return Ok(Target::Stderr);
    };
    let file = File::create(path).map_err(|e| {
        Error::other(format!(
            "failed to create log output file {}: {e}",
            path.display()
        ))
    })?;
    Ok(Target::Pipe(Box::new(file)))
}

fn level_tag(level: Level) -> &'static str {
    match level {
        Level::Error => "ERROR",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    }
}

#[cfg(test)]
mod tests {
    use std::{
        fs,
        time::{SystemTime, UNIX_EPOCH},
    };

    use env_logger::Target;
    use log::Level;

    use super::{level_tag, log_target};
    use crate::options::SolverOptions;

    #[test]
    fn level_tags_are_upper_case() {
        assert_eq!(level_tag(Level::Warn), "WARN");
        assert_eq!(level_tag(Level::Trace), "TRACE");
    }

    #[test]
    fn log_output_creates_the_file() {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after epoch")
            .as_nanos();
        let path = std::env::temp_dir().join(format!("city-tsp-log-{nanos}.log"));
        let options = SolverOptions {
            log_output: path.display().to_string(),
            ..SolverOptions::default()
        };

        let target = log_target(&options).expect("target");
        assert!(matches!(target, Target::Pipe(_)));
        assert!(path.is_file());
        fs::remove_file(&path).expect("cleanup");

        let target = log_target(&SolverOptions::default()).expect("target");
        assert!(matches!(target, Target::Stderr));
    }
}
