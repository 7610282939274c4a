use clap::{CommandFactory, Parser};
use std::{io, path::PathBuf};

/// Run simulation sweeps, merge their results and render graphs
#[derive(Debug, Parser)]
pub struct ArgParser {
    /// Scenarios to process, or `all`
    #[clap(value_name = "SCENARIO")]
    pub scenarios: Vec<String>,

    /// List the known scenarios and exit
    #[clap(short = 'l', long = "list")]
    pub list: bool,

    /// Run the simulations and merge their results
    #[clap(short = 's', long = "simulate")]
    pub simulate: bool,

    /// Do not render graphs
    #[clap(short = 'g', long = "no-graph")]
    pub no_graph: bool,

    /// Simulator executable
    #[clap(long, env = "SWEEP_PROGRAM", default_value = "./build/car-relay")]
    pub program: String,

    /// Directory the simulator writes raw results into
    #[clap(
        long,
        env = "SWEEP_RESULTS_DIR",
        default_value = "results",
        parse(from_os_str)
    )]
    pub results_dir: PathBuf,

    /// Directory holding one graph script per scenario
    #[clap(
        long,
        env = "SWEEP_GRAPHS_DIR",
        default_value = "graphs",
        parse(from_os_str)
    )]
    pub graphs_dir: PathBuf,

    /// Compression command applied to each merged table
    #[clap(long, env = "SWEEP_COMPRESSOR", default_value = "bzip2")]
    pub compressor: String,

    /// Number of simulations to run at once (defaults to the number of cores)
    #[clap(short = 'j', long = "jobs", env = "SWEEP_JOBS")]
    pub jobs: Option<usize>,
}

impl ArgParser {
    /// True when there is nothing to do: no scenario named and no listing requested.
    pub fn is_empty(&self) -> bool {
        !self.list && self.scenarios.is_empty()
    }

    /// Write the usage text, as shown when there is nothing to do.
    pub fn write_usage(out: &mut impl io::Write) -> io::Result<()> {
        Self::command().write_help(out)?;
        writeln!(out)
    }
}
