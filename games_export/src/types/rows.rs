use serde::Serialize;

/// One row of `games_info_competitors.csv`.
#[derive(Debug, Serialize, PartialEq)]
pub struct CompetitorRow {
    pub competitor_id: String,
    pub competitor_name: Option<String>,
    pub gender: Option<String>,
    pub age: Option<u32>,
    pub height: Option<String>,
    pub height_cm: Option<f64>,
    pub weight: Option<String>,
    pub weight_kg: Option<f64>,
    pub affiliate_name: Option<String>,
    pub country: Option<String>,
    pub region: Option<String>,
    pub status: Option<String>,
    pub overall_rank: Option<u32>,
    pub overall_score: Option<i64>,
    pub year: i32,
    pub division: u8,
}

impl CompetitorRow {
    pub const HEADERS: [&'static str; 16] = [
        "competitor_id",
        "competitor_name",
        "gender",
        "age",
        "height",
        "height_cm",
        "weight",
        "weight_kg",
        "affiliate_name",
        "country",
        "region",
        "status",
        "overall_rank",
        "overall_score",
        "year",
        "division",
    ];
}

/// One row of `games_info_scores.csv`, joinable on `competitor_id`.
#[derive(Debug, Serialize, PartialEq)]
pub struct ScoreRow {
    pub competitor_id: String,
    pub ordinal: Option<u32>,
    pub rank: Option<u32>,
    pub rank_reason: Option<String>,
    pub score: Option<String>,
    pub score_display: Option<String>,
    pub score_weight_kg: Option<f64>,
    pub scaled: Option<u8>,
    pub time: Option<String>,
    pub year: i32,
    pub division: u8,
}

impl ScoreRow {
    pub const HEADERS: [&'static str; 11] = [
        "competitor_id",
        "ordinal",
        "rank",
        "rank_reason",
        "score",
        "score_display",
        "score_weight_kg",
        "scaled",
        "time",
        "year",
        "division",
    ];
}
