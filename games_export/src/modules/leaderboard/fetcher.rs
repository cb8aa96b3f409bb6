use futures::{stream::try_unfold, Stream, TryStreamExt};
use games_export_libs::games::{
    core::{CompetitionQuery, FetchError, LeaderboardSource},
    model::LeaderboardResponse,
};
use tokio::time::{self, Duration};

/// Walks the leaderboard page by page until the reported page count is
/// reached. Each page fetch is independent; the only state between requests
/// is the next page index.
pub struct LeaderboardFetcher<'a, S> {
    source: &'a S,
    delay: Duration,
}

impl<'a, S: LeaderboardSource + Sync> LeaderboardFetcher<'a, S> {
    pub fn new(source: &'a S, delay: Duration) -> Self {
        LeaderboardFetcher { source, delay }
    }

    /// Lazy, finite stream of pages in strictly increasing page order.
    /// Restartable only by calling again, which issues a fresh query.
    pub fn pages<'q>(
        &'q self,
        query: &'q CompetitionQuery,
    ) -> impl Stream<Item = Result<LeaderboardResponse, FetchError>> + 'q {
        try_unfold(Some(1u32), move |state| async move {
            let page = match state {
                Some(page) => page,
                None => return Ok(None),
            };

            if page > 1 {
                time::sleep(self.delay).await;
            }

            let res = self.source.fetch_page(query, page).await?;
            if res.pagination.current_page != page {
                return Err(FetchError::PageMismatch {
                    requested: page,
                    reported: res.pagination.current_page,
                });
            }

            let next = if page >= res.pagination.total_pages {
                None
            } else {
                Some(page + 1)
            };

            Ok(Some((res, next)))
        })
    }

    /// Validates the query and collects every page, in order.
    pub async fn fetch_all(
        &self,
        query: &CompetitionQuery,
    ) -> Result<Vec<LeaderboardResponse>, FetchError> {
        let query = query.clone().validated()?;

        tracing::info!(
            "Start to fetch leaderboard pages for year {} division {}",
            query.year,
            query.division
        );
        let pages: Vec<LeaderboardResponse> = self.pages(&query).try_collect().await?;
        tracing::info!("{} leaderboard pages successfully fetched.", pages.len());

        Ok(pages)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use async_trait::async_trait;
    use games_export_libs::games::model::Pagination;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct FakeSource {
        pages: Vec<LeaderboardResponse>,
        calls: AtomicU32,
    }

    impl FakeSource {
        fn new(pages: Vec<LeaderboardResponse>) -> Self {
            FakeSource {
                pages,
                calls: AtomicU32::new(0),
            }
        }
    }

    #[async_trait]
    impl LeaderboardSource for FakeSource {
        async fn fetch_page(
            &self,
            _query: &CompetitionQuery,
            page: u32,
        ) -> Result<LeaderboardResponse, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.pages
                .get((page - 1) as usize)
                .cloned()
                .ok_or(FetchError::PageMismatch {
                    requested: page,
                    reported: 0,
                })
        }
    }

    fn page(current_page: u32, total_pages: u32) -> LeaderboardResponse {
        LeaderboardResponse {
            pagination: Pagination {
                current_page,
                total_pages,
                total_competitors: None,
            },
            competition: None,
            ordinals: Vec::new(),
            leaderboard_rows: Vec::new(),
        }
    }

    fn query() -> CompetitionQuery {
        CompetitionQuery {
            competition: String::from("games"),
            year: 2022,
            division: 1,
            per_page: 50,
        }
    }

    #[tokio::test]
    async fn test_fetches_every_page_in_order() {
        let source = FakeSource::new(vec![page(1, 3), page(2, 3), page(3, 3)]);
        let fetcher = LeaderboardFetcher::new(&source, Duration::from_millis(0));

        let pages = fetcher.fetch_all(&query()).await.unwrap();

        let indices: Vec<u32> = pages
            .iter()
            .map(|page| page.pagination.current_page)
            .collect();
        assert_eq!(indices, vec![1, 2, 3]);
        // one request per page, no repeats
        assert_eq!(source.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_stops_after_single_page() {
        let source = FakeSource::new(vec![page(1, 1)]);
        let fetcher = LeaderboardFetcher::new(&source, Duration::from_millis(0));

        let pages = fetcher.fetch_all(&query()).await.unwrap();

        assert_eq!(pages.len(), 1);
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_page_mismatch_aborts_the_run() {
        // page 2 reports itself as page 3
        let source = FakeSource::new(vec![page(1, 3), page(3, 3)]);
        let fetcher = LeaderboardFetcher::new(&source, Duration::from_millis(0));

        let result = fetcher.fetch_all(&query()).await;

        assert!(matches!(
            result,
            Err(FetchError::PageMismatch {
                requested: 2,
                reported: 3
            })
        ));
    }

    #[tokio::test]
    async fn test_invalid_query_fails_before_any_request() {
        let source = FakeSource::new(vec![page(1, 1)]);
        let fetcher = LeaderboardFetcher::new(&source, Duration::from_millis(0));

        let invalid = CompetitionQuery {
            per_page: 0,
            ..query()
        };
        let result = fetcher.fetch_all(&invalid).await;

        assert!(matches!(result, Err(FetchError::InvalidQuery(_))));
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }
}
