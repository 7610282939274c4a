use crate::error::{Error, Result};
use crate::settings::Settings;
use joblib::{Job, JobSink};
use std::fmt;
use std::path::{Path, PathBuf};
use tokio::{
    fs::{self, File},
    io::{AsyncBufReadExt, AsyncWriteExt, BufReader, BufWriter},
    process::Command,
};

/// One of the output categories the simulator writes per invocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Subtype {
    JumpDistance,
    Distance,
    InCache,
    Tx,
}

impl Subtype {
    /// Every subtype, in the order tables are merged.
    pub const ALL: [Subtype; 4] = [
        Subtype::JumpDistance,
        Subtype::Distance,
        Subtype::InCache,
        Subtype::Tx,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Subtype::JumpDistance => "jump-distance",
            Subtype::Distance => "distance",
            Subtype::InCache => "in-cache",
            Subtype::Tx => "tx",
        }
    }
}

impl fmt::Display for Subtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named sweep over runs and distances.
#[derive(Clone, Debug)]
pub struct Scenario {
    pub name: String,
    pub extra_flags: Vec<String>,
    pub runs: Vec<u32>,
    pub distances: Vec<u32>,
}

impl Scenario {
    pub fn new(
        name: impl Into<String>,
        extra_flags: impl IntoIterator<Item = String>,
        runs: impl IntoIterator<Item = u32>,
        distances: impl IntoIterator<Item = u32>,
    ) -> Self {
        Self {
            name: name.into(),
            extra_flags: extra_flags.into_iter().collect(),
            runs: runs.into_iter().collect(),
            distances: distances.into_iter().collect(),
        }
    }

    /// Every `(distance, run)` pair of the sweep: distance is the outer loop, run the inner one.
    pub fn sweep(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.distances
            .iter()
            .flat_map(move |&distance| self.runs.iter().map(move |&run| (distance, run)))
    }

    pub fn job(&self, program: &str, run: u32, distance: u32) -> Job {
        let args = [format!("--run={}", run), format!("--distance={}", distance)];
        Job::new(
            program,
            args.into_iter().chain(self.extra_flags.iter().cloned()),
        )
    }

    /// Submit one simulator job per sweep point. Does not wait for them.
    pub fn simulate(&self, sink: &impl JobSink, settings: &Settings) -> Result<usize> {
        let mut submitted = 0;
        for (distance, run) in self.sweep() {
            sink.submit(self.job(&settings.program, run, distance))?;
            submitted += 1;
        }
        log::info!("{}: submitted {} simulations", self.name, submitted);
        Ok(submitted)
    }

    /// Merge the raw per-run files into one table per subtype and compress each table.
    ///
    /// Raw files are deleted as soon as they have been merged. A missing raw file aborts the merge,
    /// leaving it and every file after it in place.
    pub async fn postprocess(&self, settings: &Settings) -> Result<Vec<PathBuf>> {
        let out_dir = settings.scenario_dir(&self.name);
        fs::create_dir_all(&out_dir)
            .await
            .map_err(|source| Error::OutputDir {
                path: out_dir.clone(),
                source,
            })?;

        let mut tables = Vec::with_capacity(Subtype::ALL.len());
        for subtype in Subtype::ALL {
            let table = self.merge_subtype(settings, &out_dir, subtype).await?;
            compress(&settings.compressor, &table).await;
            tables.push(table);
        }
        log::info!("{}: merged results into {}", self.name, out_dir.display());
        Ok(tables)
    }

    async fn merge_subtype(
        &self,
        settings: &Settings,
        out_dir: &Path,
        subtype: Subtype,
    ) -> Result<PathBuf> {
        let path = settings.table_path(out_dir, subtype.as_str());
        let table_err = |source| Error::Table {
            path: path.clone(),
            source,
        };
        let mut out = BufWriter::new(File::create(&path).await.map_err(table_err)?);

        let mut need_header = true;
        for (distance, run) in self.sweep() {
            let raw = settings.raw_path(run, distance, subtype.as_str());
            let raw_err = |source| Error::RawFile {
                path: raw.clone(),
                source,
            };
            let mut reader = BufReader::new(File::open(&raw).await.map_err(raw_err)?);

            // every file starts with a header, only the first one is kept
            let mut line = Vec::new();
            reader
                .read_until(b'\n', &mut line)
                .await
                .map_err(raw_err)?;
            if need_header {
                out.write_all(b"Run\tDistance\t").await.map_err(table_err)?;
                out.write_all(&line).await.map_err(table_err)?;
                need_header = false;
            }

            let prefix = format!("{}\t{}\t", run, distance);
            loop {
                line.clear();
                if reader
                    .read_until(b'\n', &mut line)
                    .await
                    .map_err(raw_err)?
                    == 0
                {
                    break;
                }
                out.write_all(prefix.as_bytes()).await.map_err(table_err)?;
                out.write_all(&line).await.map_err(table_err)?;
            }

            drop(reader);
            fs::remove_file(&raw).await.map_err(raw_err)?;
        }

        out.flush().await.map_err(table_err)?;
        Ok(path)
    }

    /// Render this scenario's graphs with its script, if there is one.
    pub async fn graph(&self, settings: &Settings) {
        let script = settings.graph_script(&self.name);
        log::info!("{}: rendering graphs with {}", self.name, script.display());
        run_tool(Command::new(&script), &script.display().to_string()).await;
    }
}

/// Compress a merged table in place, replacing any earlier compressed copy.
async fn compress(compressor: &str, table: &Path) {
    let mut command = Command::new(compressor);
    command.arg("-f").arg(table);
    run_tool(command, &format!("{} -f {}", compressor, table.display())).await;
}

/// Run a helper tool to completion. Failures are logged and otherwise ignored.
async fn run_tool(mut command: Command, description: &str) {
    match command.status().await {
        Ok(status) if status.success() => {}
        Ok(status) => log::warn!("`{}` failed: {}", description, status),
        Err(e) => log::warn!("failed to launch `{}`: {}", description, e),
    }
}
