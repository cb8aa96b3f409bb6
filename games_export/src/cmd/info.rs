use crate::cmd::Division;
use anyhow::{Context, Result};
use clap::Args;
use games_export_libs::games::core::{
    CompetitionQuery, GamesClient, LeaderboardSource, DEFAULT_BASE_URL,
};
use std::env;

#[derive(Debug, Args)]
pub struct InfoArgs {
    #[arg(long)]
    year: i32,
    #[arg(long)]
    division: Division,
    #[arg(long, default_value = "games")]
    competition: String,
}

/// Prints competition metadata without exporting anything: competition id,
/// page/competitor totals, and the number of scored events.
pub async fn run(args: InfoArgs) -> Result<()> {
    let base_url = env::var("GAMES_API_BASE_URL").unwrap_or(String::from(DEFAULT_BASE_URL));
    let client = GamesClient::new(&base_url)?;

    for division in args.division.codes() {
        let query = CompetitionQuery {
            competition: args.competition.clone(),
            year: args.year,
            division,
            per_page: 50,
        }
        .validated()?;

        let page = client.fetch_page(&query, 1).await.with_context(|| {
            format!(
                "failed to fetch competition info for year {} division {}",
                args.year, division
            )
        })?;

        let competition_id = page
            .competition
            .and_then(|competition| competition.competition_id)
            .unwrap_or_default();

        println!(
            "year={} division={} competition_id={} total_pages={} total_competitors={} total_events={}",
            args.year,
            division,
            competition_id,
            page.pagination.total_pages,
            page.pagination.total_competitors.unwrap_or(0),
            page.ordinals.len()
        );
    }

    Ok(())
}
