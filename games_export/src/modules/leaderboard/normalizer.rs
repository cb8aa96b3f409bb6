use crate::types::rows::{CompetitorRow, ScoreRow};
use games_export_libs::games::{
    core::CompetitionQuery,
    model::{Entrant, LeaderboardResponse, LeaderboardRow, WorkoutScore},
};
use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

static NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+(?:\.\d+)?").unwrap());

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("competitor record at position {position} on page {page} is missing its id")]
    MissingCompetitorId { page: u32, position: usize },
}

/// What to do with a record that has no competitor id. Skip matches the
/// behavior of previous exports; Abort fails the whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordPolicy {
    Skip,
    Abort,
}

#[derive(Debug, Default)]
pub struct NormalizeOutcome {
    pub competitors: Vec<CompetitorRow>,
    pub scores: Vec<ScoreRow>,
    pub skipped: usize,
}

/// Flattens fetched pages into one competitor row per entrant and one score
/// row per nested workout score. Missing optional fields stay empty, never
/// dropped; rows keep page order so re-runs produce identical files.
pub fn normalize_pages(
    query: &CompetitionQuery,
    pages: &[LeaderboardResponse],
    policy: RecordPolicy,
) -> Result<NormalizeOutcome, RecordError> {
    let mut outcome = NormalizeOutcome::default();

    for page in pages {
        let page_index = page.pagination.current_page;

        for (position, row) in page.leaderboard_rows.iter().enumerate() {
            let (entrant, id) = match identified(row) {
                Some(pair) => pair,
                None => {
                    if policy == RecordPolicy::Abort {
                        return Err(RecordError::MissingCompetitorId {
                            page: page_index,
                            position,
                        });
                    }
                    tracing::warn!(
                        "skipping competitor record at position {} on page {}: missing id",
                        position,
                        page_index
                    );
                    outcome.skipped += 1;
                    continue;
                }
            };

            outcome.competitors.push(competitor_row(query, id, entrant, row));
            for score in row.scores.iter() {
                outcome.scores.push(score_row(query, id, score));
            }
        }
    }

    let before = outcome.competitors.len();
    outcome.competitors = outcome
        .competitors
        .into_iter()
        .unique_by(|competitor| competitor.competitor_id.clone())
        .collect();
    if outcome.competitors.len() < before {
        tracing::warn!(
            "{} duplicate competitor records were dropped",
            before - outcome.competitors.len()
        );
    }

    Ok(outcome)
}

fn identified(row: &LeaderboardRow) -> Option<(&Entrant, &str)> {
    let entrant = row.entrant.as_ref()?;
    let id = entrant.competitor_id.as_deref()?;
    if id.is_empty() {
        return None;
    }
    Some((entrant, id))
}

fn competitor_row(
    query: &CompetitionQuery,
    id: &str,
    entrant: &Entrant,
    row: &LeaderboardRow,
) -> CompetitorRow {
    CompetitorRow {
        competitor_id: id.to_string(),
        competitor_name: entrant.competitor_name.clone(),
        gender: entrant.gender.clone(),
        age: entrant.age.as_deref().and_then(|age| age.parse().ok()),
        height: entrant.height.clone(),
        height_cm: entrant.height.as_deref().and_then(inch_to_cm),
        weight: entrant.weight.clone(),
        weight_kg: entrant.weight.as_deref().and_then(lb_to_kg),
        affiliate_name: entrant.affiliate_name.clone(),
        country: entrant.country.clone(),
        region: entrant.region.clone(),
        status: entrant.status.clone(),
        overall_rank: row.overall_rank.as_deref().and_then(|rank| parse_rank(rank).0),
        overall_score: row.overall_score.as_deref().and_then(|score| score.parse().ok()),
        year: query.year,
        division: query.division,
    }
}

fn score_row(query: &CompetitionQuery, id: &str, score: &WorkoutScore) -> ScoreRow {
    let (rank, rank_reason) = score
        .rank
        .as_deref()
        .map(parse_rank)
        .unwrap_or((None, None));

    ScoreRow {
        competitor_id: id.to_string(),
        ordinal: score.ordinal,
        rank,
        rank_reason,
        score: score.score.clone(),
        score_display: score.score_display.clone(),
        score_weight_kg: score
            .score_display
            .as_deref()
            .filter(|display| display.contains("lb") || display.contains("kg"))
            .and_then(lb_to_kg),
        scaled: score.scaled,
        time: score.time.clone(),
        year: query.year,
        division: query.division,
    }
}

/// Ranks arrive as "1", tied as "T5", or as the sentinels CUT/WD/DNF, which
/// become rank 0 with the sentinel preserved as the reason.
pub fn parse_rank(raw: &str) -> (Option<u32>, Option<String>) {
    match raw.trim() {
        reason @ ("CUT" | "WD" | "DNF") => (Some(0), Some(String::from(reason))),
        value => (
            NUMBER
                .find(value)
                .and_then(|m| m.as_str().parse().ok()),
            None,
        ),
    }
}

fn first_number(raw: &str) -> Option<f64> {
    NUMBER.find(raw).and_then(|m| m.as_str().parse().ok())
}

/// The api reports weight like "195 lb"; values already metric pass through.
pub fn lb_to_kg(raw: &str) -> Option<f64> {
    if raw.contains("kg") {
        return first_number(raw);
    }
    first_number(raw).map(|lb| round2(lb * 0.45359237))
}

/// Heights come as plain inches; values already metric pass through.
pub fn inch_to_cm(raw: &str) -> Option<f64> {
    if raw.contains("cm") {
        return first_number(raw);
    }
    first_number(raw).map(|inches| round2(inches * 2.54))
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
