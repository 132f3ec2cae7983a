use std::path::{Path, PathBuf};

use city_tsp_derive::KvDisplay;

use crate::{
    Error, Result,
    graph::{CityNetwork, EDGES_FILE, NODES_FILE},
};

const CSV_EXTENSION: &str = "csv";

/// A validated dataset location: a directory holding `nodes.csv` and `edges.csv`,
/// or one combined `.csv` edge table.
#[derive(Clone, Debug, Eq, PartialEq, KvDisplay)]
pub struct DatasetSource {
    #[kv(fmt = "path")]
    pub path: PathBuf,
    pub is_directory: bool,
}

impl DatasetSource {
    pub fn resolve(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(Error::invalid_input("Missing --dataset <path>"));
        }

        let path = PathBuf::from(raw);
        if path.is_dir() {
            for file in [NODES_FILE, EDGES_FILE] {
                if !path.join(file).is_file() {
                    return Err(Error::invalid_input(format!(
                        "Dataset directory {} has no {file}",
                        path.display()
                    )));
                }
            }
            return Ok(Self {
                path,
                is_directory: true,
            });
        }

        if !path.is_file() {
            return Err(Error::invalid_input(format!(
                "Dataset not found: {}",
                path.display()
            )));
        }
        if !has_csv_extension(&path) {
            return Err(Error::invalid_input(format!(
                "Dataset file {} must have the .{CSV_EXTENSION} extension",
                path.display()
            )));
        }
        Ok(Self {
            path,
            is_directory: false,
        })
    }

    #[city_tsp_derive::timer("network.load")]
    pub fn load(&self) -> Result<CityNetwork> {
        CityNetwork::from_source(&self.path, self.is_directory)
    }
}

fn has_csv_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(CSV_EXTENSION))
}
