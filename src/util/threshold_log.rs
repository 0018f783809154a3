//! append-only CSV log of experiment summaries

use std::fs::{File, OpenOptions};
use std::path::Path;

use crate::error::Result;
use crate::experiment::ExperimentSummary;

const HEADER: [&str; 7] = [
    "n",
    "trials",
    "mean",
    "stddev",
    "confidence_low",
    "confidence_high",
    "seconds",
];

pub struct ThresholdLog {
    writer: csv::Writer<File>,
}

impl ThresholdLog {
    /// opens `path` for appending, creating it (with a header row) if it is empty
    pub fn open(path: &Path) -> Result<ThresholdLog> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;

        let mut writer = csv::Writer::from_writer(file);
        if writer.get_ref().metadata()?.len() == 0 {
            writer.write_record(HEADER)?;
            writer.flush()?;
        }
        Ok(ThresholdLog { writer })
    }

    /// writes one row and flushes it, so a crash later on keeps earlier results
    pub fn append(&mut self, summary: &ExperimentSummary) -> Result<()> {
        self.writer.write_record(&[
            summary.side_length.to_string(),
            summary.trials.to_string(),
            summary.mean.to_string(),
            summary.stddev.to_string(),
            summary.confidence_low.to_string(),
            summary.confidence_high.to_string(),
            summary.seconds.to_string(),
        ])?;
        self.writer.flush()?;
        Ok(())
    }
}
