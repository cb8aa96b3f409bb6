use crate::types::rows::{CompetitorRow, ScoreRow};
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

pub const COMPETITORS_FILE: &str = "games_info_competitors.csv";
pub const SCORES_FILE: &str = "games_info_scores.csv";

/// Writes both tables in one shot after normalization completes. Each run is
/// a full rewrite of the destination files.
pub struct CsvTableWriter {
    save_dir: PathBuf,
}

impl CsvTableWriter {
    pub fn new(save_dir: &Path) -> Self {
        CsvTableWriter {
            save_dir: save_dir.to_owned(),
        }
    }

    pub fn write(&self, competitors: &[CompetitorRow], scores: &[ScoreRow]) -> Result<()> {
        self.write_table(COMPETITORS_FILE, &CompetitorRow::HEADERS, competitors)?;
        self.write_table(SCORES_FILE, &ScoreRow::HEADERS, scores)?;

        Ok(())
    }

    // Headers are written unconditionally so an empty run still produces
    // header-only files.
    fn write_table<T: Serialize>(&self, name: &str, headers: &[&str], rows: &[T]) -> Result<()> {
        let path = self.save_dir.join(name);
        tracing::info!("Generate table file: {}", path.display());

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&path)
            .with_context(|| format!("failed to create {}", path.display()))?;

        writer
            .write_record(headers)
            .with_context(|| format!("failed to write header of {}", path.display()))?;
        for row in rows {
            writer
                .serialize(row)
                .with_context(|| format!("failed to write row of {}", path.display()))?;
        }
        writer
            .flush()
            .with_context(|| format!("failed to flush {}", path.display()))?;

        Ok(())
    }
}
