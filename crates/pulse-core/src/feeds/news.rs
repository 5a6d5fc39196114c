//! News Feed
//!
//! Latest headlines, newest first, at most [`NEWS_LIMIT`] of them.

use std::sync::Arc;

use crate::error::Result;
use crate::model::NewsItem;
use crate::source::NewsSource;

/// Headlines kept after sorting
pub const NEWS_LIMIT: usize = 5;

/// Observable state of the news section.
///
/// `Loaded(vec![])` means the API returned zero posts; `Failed` means the
/// fetch itself failed. The failure is logged, never shown as an error.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum NewsState {
    #[default]
    Loading,
    Loaded(Vec<NewsItem>),
    Failed,
}

impl NewsState {
    pub fn settle(&mut self, result: Result<Vec<NewsItem>>) {
        *self = match result {
            Ok(items) => Self::Loaded(items),
            Err(e) => {
                tracing::error!("News feed failed: {}", e);
                Self::Failed
            }
        };
    }

    /// Items to render; empty while loading or after a failure
    pub fn items(&self) -> &[NewsItem] {
        match self {
            Self::Loaded(items) => items,
            Self::Loading | Self::Failed => &[],
        }
    }

    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// Sort newest first and keep the top [`NEWS_LIMIT`]
pub fn latest_first(mut items: Vec<NewsItem>) -> Vec<NewsItem> {
    items.sort_by(|a, b| b.published_at.cmp(&a.published_at));
    items.truncate(NEWS_LIMIT);
    items
}

/// Fetcher for the news section
#[derive(Clone)]
pub struct NewsFeed {
    source: Arc<dyn NewsSource>,
}

impl NewsFeed {
    pub fn new(source: Arc<dyn NewsSource>) -> Self {
        Self { source }
    }

    pub async fn fetch(&self) -> Result<Vec<NewsItem>> {
        tracing::debug!(source = self.source.name(), "Fetching news");
        let posts = self.source.latest_posts().await?;
        Ok(latest_first(posts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockFailure, MockNewsSource};

    fn strictly_descending(items: &[NewsItem]) -> bool {
        items.windows(2).all(|w| w[0].published_at > w[1].published_at)
    }

    #[tokio::test]
    async fn test_keeps_five_newest() {
        let feed = NewsFeed::new(Arc::new(MockNewsSource::hourly(9)));
        let items = feed.fetch().await.unwrap();

        assert_eq!(items.len(), 5);
        assert!(strictly_descending(&items));
        // hourly() publishes oldest first, so the last ids are the newest.
        let ids: Vec<u64> = items.iter().map(|i| i.id).collect();
        assert_eq!(ids, [9, 8, 7, 6, 5]);
    }

    #[tokio::test]
    async fn test_fewer_than_five_are_all_kept() {
        let feed = NewsFeed::new(Arc::new(MockNewsSource::hourly(3)));
        let items = feed.fetch().await.unwrap();

        assert_eq!(items.len(), 3);
        assert!(strictly_descending(&items));
    }

    #[tokio::test]
    async fn test_zero_results_differs_from_failure() {
        let mut empty = NewsState::default();
        empty.settle(NewsFeed::new(Arc::new(MockNewsSource::new(Vec::new()))).fetch().await);
        assert_eq!(empty, NewsState::Loaded(Vec::new()));

        let mut failed = NewsState::default();
        failed.settle(
            NewsFeed::new(Arc::new(MockNewsSource::failing(MockFailure::Malformed(
                "missing results".into(),
            ))))
            .fetch()
            .await,
        );
        assert_eq!(failed, NewsState::Failed);
        assert!(failed.items().is_empty());
    }
}
