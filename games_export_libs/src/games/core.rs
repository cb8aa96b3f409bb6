use crate::games::model::LeaderboardResponse;
use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use std::time::Duration;
use thiserror::Error;
use validator::Validate;

type Result<T> = std::result::Result<T, FetchError>;

pub const DEFAULT_BASE_URL: &str = "https://c3po.crossfit.com/api/leaderboards/v2";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to build http client")]
    Client(#[source] reqwest::Error),
    #[error("invalid leaderboard url given")]
    InvalidUrl(#[from] url::ParseError),
    #[error("invalid competition query: {0}")]
    InvalidQuery(String),
    #[error("request for page {page} failed")]
    Request {
        page: u32,
        #[source]
        source: reqwest::Error,
    },
    #[error("page {page} returned status {status}")]
    Status { page: u32, status: StatusCode },
    #[error("failed to decode the body of page {page}")]
    Decode {
        page: u32,
        #[source]
        source: reqwest::Error,
    },
    #[error("requested page {requested} but the api reported page {reported}")]
    PageMismatch { requested: u32, reported: u32 },
}

/// What to fetch: one competition, one year, one concrete division code.
///
/// Division codes follow the upstream convention: 1 is men, 2 is women.
#[derive(Debug, Clone, Validate)]
pub struct CompetitionQuery {
    pub competition: String,
    #[validate(range(min = 2007))]
    pub year: i32,
    #[validate(range(min = 1, max = 2))]
    pub division: u8,
    #[validate(range(min = 1, max = 100))]
    pub per_page: u32,
}

impl CompetitionQuery {
    pub fn validated(self) -> Result<Self> {
        self.validate()
            .map_err(|e| FetchError::InvalidQuery(e.to_string()))?;
        Ok(self)
    }
}

/// Narrow seam over the leaderboard endpoint so upstream schema drift is a
/// one-place fix.
#[async_trait]
pub trait LeaderboardSource {
    async fn fetch_page(&self, query: &CompetitionQuery, page: u32)
        -> Result<LeaderboardResponse>;
}

pub struct GamesClient {
    base_url: Url,
    client: Client,
}

impl GamesClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)?;
        let client = Client::builder()
            .gzip(true)
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(FetchError::Client)?;

        Ok(GamesClient { base_url, client })
    }

    pub fn page_url(&self, query: &CompetitionQuery, page: u32) -> Result<Url> {
        let mut url = Url::parse(&format!(
            "{}/competitions/{}/{}/leaderboards",
            self.base_url.as_str().trim_end_matches('/'),
            query.competition,
            query.year,
        ))?;
        url.query_pairs_mut()
            .append_pair("division", &query.division.to_string())
            .append_pair("sort", "0")
            .append_pair("page", &page.to_string())
            .append_pair("per_page", &query.per_page.to_string());

        Ok(url)
    }
}

#[async_trait]
impl LeaderboardSource for GamesClient {
    async fn fetch_page(
        &self,
        query: &CompetitionQuery,
        page: u32,
    ) -> Result<LeaderboardResponse> {
        let url = self.page_url(query, page)?;

        tracing::info!("Fetch leaderboard page {} from {}", page, url);
        let res = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Request { page, source: e })?;

        match res.error_for_status_ref() {
            Ok(_) => res
                .json::<LeaderboardResponse>()
                .await
                .map_err(|e| FetchError::Decode { page, source: e }),
            Err(_) => {
                let status = res.status();
                tracing::error!("error response returned for page {}: {}", page, status);
                Err(FetchError::Status { page, status })
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn query() -> CompetitionQuery {
        CompetitionQuery {
            competition: String::from("games"),
            year: 2022,
            division: 1,
            per_page: 50,
        }
    }

    #[test]
    fn test_page_url() {
        let client = GamesClient::new(DEFAULT_BASE_URL).unwrap();
        let url = client.page_url(&query(), 3).unwrap();

        assert_eq!(
            url.as_str(),
            "https://c3po.crossfit.com/api/leaderboards/v2/competitions/games/2022/leaderboards?division=1&sort=0&page=3&per_page=50"
        );
    }

    #[test]
    fn test_page_url_tolerates_trailing_slash() {
        let client = GamesClient::new("https://c3po.crossfit.com/api/leaderboards/v2/").unwrap();
        let url = client.page_url(&query(), 1).unwrap();

        assert_eq!(
            url.path(),
            "/api/leaderboards/v2/competitions/games/2022/leaderboards"
        );
    }

    #[test]
    fn test_query_validation() {
        assert!(query().validated().is_ok());

        let zero_page_size = CompetitionQuery {
            per_page: 0,
            ..query()
        };
        assert!(matches!(
            zero_page_size.validated(),
            Err(FetchError::InvalidQuery(_))
        ));

        let before_first_games = CompetitionQuery {
            year: 1999,
            ..query()
        };
        assert!(before_first_games.validated().is_err());

        let unknown_division = CompetitionQuery {
            division: 3,
            ..query()
        };
        assert!(unknown_division.validated().is_err());
    }

    #[test]
    fn test_rejects_invalid_base_url() {
        assert!(matches!(
            GamesClient::new("not a url"),
            Err(FetchError::InvalidUrl(_))
        ));
    }
}
