pub mod games;

pub use games::core::{CompetitionQuery, FetchError, GamesClient, LeaderboardSource};
pub use games::model::LeaderboardResponse;
