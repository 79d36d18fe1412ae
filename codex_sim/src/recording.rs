use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::Context;

use crate::GameReport;

/// Writes one JSON file per finished game into a directory.
pub struct Recorder {
    num: usize,
    directory: PathBuf,
}

impl Recorder {
    pub fn new(directory: PathBuf) -> anyhow::Result<Self> {
        if !directory.is_dir() {
            anyhow::bail!("Directory '{}' does not exist", directory.display());
        }
        Ok(Self { num: 1, directory })
    }

    pub fn write_game_report(&mut self, report: &GameReport) -> anyhow::Result<PathBuf> {
        let filepath = self.directory.join(format!("game_{:0>6}.json", self.num));
        let file = File::create(&filepath)
            .with_context(|| format!("Could not create '{}'", filepath.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), report)?;
        self.num += 1;
        Ok(filepath)
    }
}
