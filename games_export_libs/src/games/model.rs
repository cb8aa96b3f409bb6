use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr, PickFirst};

/// One page of the leaderboard endpoint.
///
/// The upstream schema is a versioned external contract; every field that is
/// not guaranteed on every competition/year is optional so that schema drift
/// surfaces as empty columns instead of decode failures.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LeaderboardResponse {
    pub pagination: Pagination,
    pub competition: Option<CompetitionMeta>,
    #[serde(default)]
    pub ordinals: Vec<Ordinal>,
    #[serde(alias = "leaderboardRows", default)]
    pub leaderboard_rows: Vec<LeaderboardRow>,
}

#[serde_as]
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Pagination {
    #[serde(alias = "currentPage")]
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub current_page: u32,
    #[serde(alias = "totalPages")]
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub total_pages: u32,
    #[serde(alias = "totalCompetitors", default)]
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub total_competitors: Option<u32>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CompetitionMeta {
    #[serde(alias = "competitionId")]
    pub competition_id: Option<String>,
    pub name: Option<String>,
}

/// Per-event metadata; only counted, never flattened.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Ordinal {
    pub id: Option<String>,
    #[serde(alias = "displayName")]
    pub display_name: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LeaderboardRow {
    pub entrant: Option<Entrant>,
    #[serde(default)]
    pub scores: Vec<WorkoutScore>,
    #[serde(alias = "overallRank")]
    pub overall_rank: Option<String>,
    #[serde(alias = "overallScore")]
    pub overall_score: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Entrant {
    #[serde(alias = "competitorId")]
    pub competitor_id: Option<String>,
    #[serde(alias = "competitorName")]
    pub competitor_name: Option<String>,
    pub gender: Option<String>,
    pub age: Option<String>,
    pub height: Option<String>,
    pub weight: Option<String>,
    #[serde(alias = "affiliateName")]
    pub affiliate_name: Option<String>,
    #[serde(alias = "countryOfOriginName")]
    pub country: Option<String>,
    #[serde(alias = "regionName")]
    pub region: Option<String>,
    pub status: Option<String>,
}

// scaled and ordinal arrive as "1" on some competitions and 1 on others.
#[serde_as]
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct WorkoutScore {
    #[serde(default)]
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub ordinal: Option<u32>,
    pub rank: Option<String>,
    pub score: Option<String>,
    #[serde(alias = "scoreDisplay")]
    pub score_display: Option<String>,
    #[serde(default)]
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub scaled: Option<u8>,
    pub time: Option<String>,
}
