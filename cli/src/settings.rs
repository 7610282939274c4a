use crate::arg_parser::ArgParser;
use std::path::{Path, PathBuf};

/// File name prefix the simulator uses for everything it writes.
pub const RESULT_PREFIX: &str = "car-relay";

/// Resolved runtime configuration shared by every scenario.
#[derive(Clone, Debug)]
pub struct Settings {
    pub program: String,
    pub results_dir: PathBuf,
    pub graphs_dir: PathBuf,
    pub compressor: String,
}

impl Settings {
    /// Where the simulator leaves the output of one (run, distance) invocation.
    pub fn raw_path(&self, run: u32, distance: u32, subtype: &str) -> PathBuf {
        self.results_dir.join(format!(
            "{}-{}-{}-{}.txt",
            RESULT_PREFIX, run, distance, subtype
        ))
    }

    pub fn scenario_dir(&self, scenario: &str) -> PathBuf {
        self.results_dir.join(scenario)
    }

    pub fn table_path(&self, scenario_dir: &Path, subtype: &str) -> PathBuf {
        scenario_dir.join(format!("{}-{}.txt", RESULT_PREFIX, subtype))
    }

    pub fn graph_script(&self, scenario: &str) -> PathBuf {
        self.graphs_dir.join(format!("{}.R", scenario))
    }
}

impl From<&ArgParser> for Settings {
    fn from(args: &ArgParser) -> Self {
        Self {
            program: args.program.clone(),
            results_dir: args.results_dir.clone(),
            graphs_dir: args.graphs_dir.clone(),
            compressor: args.compressor.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_follow_simulator_layout() {
        let settings = Settings {
            program: "./build/car-relay".into(),
            results_dir: "results".into(),
            graphs_dir: "graphs".into(),
            compressor: "bzip2".into(),
        };
        assert_eq!(
            settings.raw_path(3, 25, "in-cache"),
            PathBuf::from("results/car-relay-3-25-in-cache.txt")
        );
        let dir = settings.scenario_dir("demo");
        assert_eq!(dir, PathBuf::from("results/demo"));
        assert_eq!(
            settings.table_path(&dir, "tx"),
            PathBuf::from("results/demo/car-relay-tx.txt")
        );
        assert_eq!(
            settings.graph_script("demo"),
            PathBuf::from("graphs/demo.R")
        );
    }
}
