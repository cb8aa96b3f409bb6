use crate::{
    cmd::Division,
    modules::leaderboard::{
        fetcher::LeaderboardFetcher,
        normalizer::{normalize_pages, RecordPolicy},
        writer::CsvTableWriter,
    },
};
use anyhow::{Context, Result};
use clap::Args;
use games_export_libs::games::core::{CompetitionQuery, GamesClient, DEFAULT_BASE_URL};
use std::{env, ffi::OsString, path::PathBuf};
use tokio::time::Duration;

#[derive(Debug, Args)]
pub struct ExportArgs {
    #[arg(long)]
    year: i32,
    #[arg(long)]
    division: Division,
    #[arg(long, default_value = "games")]
    competition: String,
    #[arg(long, default_value_t = 50)]
    per_page: u32,
    #[arg(long)]
    save_dir: Option<OsString>,
    /// Abort the run on a malformed competitor record instead of skipping it.
    #[arg(long)]
    strict: bool,
}

pub async fn run(args: ExportArgs) -> Result<()> {
    tracing::info!(
        "Start export of competition {} year {} division {}",
        args.competition,
        args.year,
        args.division
    );

    let base_url = env::var("GAMES_API_BASE_URL").unwrap_or(String::from(DEFAULT_BASE_URL));

    let save_dir: PathBuf = match args.save_dir {
        Some(path) => PathBuf::from(path),
        None => match env::var("EXPORT_SAVE_DIRECTORY") {
            Ok(path) => {
                let save_dir = PathBuf::from(path);
                tracing::info!("Tables will be saved at {}", save_dir.display());
                save_dir
            }
            Err(e) => {
                let message = format!("couldn't determine table save directory {:?}", e);
                tracing::error!(message);
                anyhow::bail!(message)
            }
        },
    };

    if !save_dir.exists() {
        tracing::warn!(
            "The directory {} doesn't exists, so attempt to create it",
            save_dir.display()
        );
        tokio::fs::create_dir_all(&save_dir)
            .await
            .with_context(|| {
                let message = format!("failed to create the directory {}", save_dir.display());
                tracing::error!(message);
                message
            })?;
    }

    let client = GamesClient::new(&base_url)?;
    let fetcher = LeaderboardFetcher::new(&client, Duration::from_millis(500));
    let policy = if args.strict {
        RecordPolicy::Abort
    } else {
        RecordPolicy::Skip
    };

    let mut competitors = Vec::new();
    let mut scores = Vec::new();
    let mut skipped: usize = 0;

    for division in args.division.codes() {
        tracing::info!("Processing division {} for year {}", division, args.year);

        let query = CompetitionQuery {
            competition: args.competition.clone(),
            year: args.year,
            division,
            per_page: args.per_page,
        };

        let pages = fetcher.fetch_all(&query).await.with_context(|| {
            format!(
                "failed to fetch the leaderboard for year {} division {}",
                args.year, division
            )
        })?;

        let outcome = normalize_pages(&query, &pages, policy)?;
        competitors.extend(outcome.competitors);
        scores.extend(outcome.scores);
        skipped += outcome.skipped;
    }

    if skipped > 0 {
        tracing::warn!("{} malformed competitor records were skipped", skipped);
    }

    let writer = CsvTableWriter::new(&save_dir);
    writer.write(&competitors, &scores)?;

    tracing::info!(
        "{} competitors and {} scores successfully written to {}",
        competitors.len(),
        scores.len(),
        save_dir.display()
    );

    Ok(())
}
