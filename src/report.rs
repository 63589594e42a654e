use std::{
    fs::OpenOptions,
    io::BufWriter,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use log::error;
use serde::Serialize;

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub(crate) struct Failure {
    pub path: PathBuf,
    pub reason: String,
}

#[derive(Serialize, Debug, Default)]
pub(crate) struct Summary {
    pub converted: usize,
    // articles without front matter
    pub skipped: Vec<PathBuf>,
    pub failed: Vec<Failure>,
}

impl Summary {
    pub fn not_converted(&self) -> usize {
        self.skipped.len() + self.failed.len()
    }

    pub fn print(&self) {
        println!();
        println!("Converted: {} file(s)", self.converted);
        println!("Failed/skipped: {} file(s)", self.not_converted());
    }
}

pub(crate) fn save_report(report_path: &Path, summary: &Summary) -> anyhow::Result<()> {
    if let Some(parent) = report_path.parent() {
        fs_extra::dir::create_all(parent, false)?;
    }
    let fd = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(report_path)?;
    let writer = BufWriter::new(fd);
    serde_json::to_writer_pretty(writer, summary)?;

    Ok(())
}

// the run itself already finished, so a failed report is only logged
pub(crate) fn write_report(report_path: &Path, summary: &Summary) -> bool {
    match save_report(report_path, summary)
        .with_context(|| format!("while saving report to {report_path:?}"))
    {
        Ok(()) => true,
        Err(e) => {
            error!("{e:#}");
            false
        }
    }
}
