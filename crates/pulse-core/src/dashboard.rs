//! Dashboard View
//!
//! Runs the three feeds concurrently inside the view's [`RequestScope`] and
//! folds their outcomes into [`DashboardState`] in whatever order they land.
//! Any subset of settled feeds renders correctly; the rest stay loading.

use std::pin::pin;

use futures::future;
use futures::stream::{self, Stream, StreamExt};

use crate::error::Result;
use crate::feedback::{FeedbackRecorder, VoteBoard};
use crate::feeds::{InsightFeed, InsightState, NewsFeed, NewsState, PriceFeed, PriceFeedState};
use crate::model::{Coin, NewsItem, Section, Vote};
use crate::notify::Notification;
use crate::scope::{RequestScope, ScopeHandle};

/// A settled feed request
#[derive(Debug)]
pub enum FeedUpdate {
    Prices(Result<Vec<Coin>>),
    News(Result<Vec<NewsItem>>),
    Insight(Result<String>),
}

/// Everything the dashboard renders
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DashboardState {
    pub prices: PriceFeedState,
    pub news: NewsState,
    pub insight: InsightState,
    pub votes: VoteBoard,
    pub meme_url: String,
}

impl DashboardState {
    pub fn new(meme_url: impl Into<String>) -> Self {
        Self {
            prices: PriceFeedState::default(),
            news: NewsState::default(),
            insight: InsightState::default(),
            votes: VoteBoard::new(),
            meme_url: meme_url.into(),
        }
    }

    pub fn apply(&mut self, update: FeedUpdate) {
        match update {
            FeedUpdate::Prices(result) => self.prices.settle(result),
            FeedUpdate::News(result) => self.news.settle(result),
            FeedUpdate::Insight(result) => self.insight.settle(result),
        }
    }

    /// True once all three feeds have settled
    pub fn is_settled(&self) -> bool {
        !self.prices.loading && !self.news.is_loading() && self.insight != InsightState::Pending
    }
}

/// The three section fetchers
#[derive(Clone)]
pub struct DashboardFeeds {
    pub prices: PriceFeed,
    pub news: NewsFeed,
    pub insight: InsightFeed,
}

impl DashboardFeeds {
    pub const fn new(prices: PriceFeed, news: NewsFeed, insight: InsightFeed) -> Self {
        Self { prices, news, insight }
    }

    /// Issue all three requests in `scope` and yield each outcome as it
    /// settles. Requests cut short by cancellation yield nothing.
    pub fn updates(&self, scope: &ScopeHandle) -> impl Stream<Item = FeedUpdate> + use<> {
        let prices = {
            let (feed, scope) = (self.prices.clone(), scope.clone());
            stream::once(async move { scope.run(feed.fetch()).await.map(FeedUpdate::Prices) })
        };
        let news = {
            let (feed, scope) = (self.news.clone(), scope.clone());
            stream::once(async move { scope.run(feed.fetch()).await.map(FeedUpdate::News) })
        };
        let insight = {
            let (feed, scope) = (self.insight.clone(), scope.clone());
            stream::once(async move { scope.run(feed.fetch()).await.map(FeedUpdate::Insight) })
        };

        stream::select(stream::select(prices, news), insight).filter_map(future::ready)
    }
}

/// One mounted dashboard. Dropping it cancels its outstanding requests.
pub struct DashboardView {
    feeds: DashboardFeeds,
    recorder: FeedbackRecorder,
    state: DashboardState,
    scope: RequestScope,
}

impl DashboardView {
    pub fn new(feeds: DashboardFeeds, recorder: FeedbackRecorder, meme_url: impl Into<String>) -> Self {
        Self {
            feeds,
            recorder,
            state: DashboardState::new(meme_url),
            scope: RequestScope::new(),
        }
    }

    pub const fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn scope_handle(&self) -> ScopeHandle {
        self.scope.handle()
    }

    pub fn cancel(&self) {
        self.scope.cancel();
    }

    /// Fetch every section once. Returns when all feeds settled or the scope
    /// was cancelled.
    pub async fn load(&mut self) {
        let mut updates = pin!(self.feeds.updates(&self.scope.handle()));
        while let Some(update) = updates.next().await {
            self.state.apply(update);
        }
        tracing::debug!(settled = self.state.is_settled(), "Dashboard load finished");
    }

    /// Record a vote. Returns `None` if the view was cancelled before the
    /// submission settled; the local vote is kept either way.
    pub async fn vote(&mut self, section: Section, vote: Vote) -> Option<Notification> {
        let pending = self.recorder.cast(&mut self.state.votes, section, vote);
        let outcome = self.scope.run(self.recorder.submit(&pending)).await?;
        Some(self.recorder.settle(&mut self.state.votes, &pending, &outcome))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::Arc;

    use async_trait::async_trait;

    use super::*;
    use crate::mock::{MockBackend, MockFailure, MockLlmProvider, MockNewsSource, MockPriceSource};
    use crate::source::{PriceQuote, PriceSource};

    /// Price source whose request never completes
    struct StalledPriceSource;

    #[async_trait]
    impl PriceSource for StalledPriceSource {
        async fn simple_prices(&self, _ids: &[&str]) -> Result<BTreeMap<String, PriceQuote>> {
            future::pending().await
        }

        fn name(&self) -> &str {
            "stalled"
        }
    }

    fn feeds(prices: Arc<dyn PriceSource>) -> DashboardFeeds {
        DashboardFeeds::new(
            PriceFeed::new(prices),
            NewsFeed::new(Arc::new(MockNewsSource::hourly(7))),
            InsightFeed::new(Arc::new(MockLlmProvider::new("HODL.")), "gpt-4o-mini"),
        )
    }

    fn view(prices: Arc<dyn PriceSource>, backend: MockBackend) -> DashboardView {
        DashboardView::new(
            feeds(prices),
            FeedbackRecorder::new(Arc::new(backend)),
            "https://example.com/meme.jpg",
        )
    }

    #[tokio::test]
    async fn test_load_settles_every_section() {
        let mut view = view(Arc::new(MockPriceSource::new()), MockBackend::new());
        view.load().await;

        let state = view.state();
        assert!(state.is_settled());
        assert_eq!(state.prices.coins.len(), 5);
        assert_eq!(state.news.items().len(), 5);
        assert_eq!(state.insight.insight(), Some("HODL."));
        assert_eq!(state.meme_url, "https://example.com/meme.jpg");
    }

    #[test]
    fn test_any_subset_renders() {
        let mut state = DashboardState::new("m");
        state.apply(FeedUpdate::Insight(Ok("Buy the dip.".into())));
        assert!(state.prices.loading);
        assert!(state.news.is_loading());
        assert_eq!(state.insight.insight(), Some("Buy the dip."));
        assert!(!state.is_settled());

        state.apply(FeedUpdate::News(Err(MockFailure::Transport("offline".into()).to_error())));
        state.apply(FeedUpdate::Prices(Ok(Vec::new())));
        assert!(state.is_settled());
        assert_eq!(state.news, NewsState::Failed);
    }

    #[tokio::test]
    async fn test_cancel_discards_outstanding_feed() {
        let mut view = view(Arc::new(StalledPriceSource), MockBackend::new());
        let handle = view.scope_handle();

        let canceller = async {
            while handle.in_flight() == 0 {
                tokio::task::yield_now().await;
            }
            handle.cancel();
        };
        tokio::join!(view.load(), canceller);

        let state = view.state();
        assert!(state.prices.loading);
        assert!(state.prices.coins.is_empty());
        assert!(!state.is_settled());
    }

    #[tokio::test]
    async fn test_cancelled_view_issues_nothing() {
        let mut view = view(Arc::new(MockPriceSource::new()), MockBackend::new());
        view.cancel();
        view.load().await;

        assert_eq!(view.state(), &DashboardState::new("https://example.com/meme.jpg"));
    }

    #[tokio::test]
    async fn test_vote_updates_board_and_notifies() {
        let mut view = view(Arc::new(MockPriceSource::new()), MockBackend::new());
        let note = view.vote(Section::Prices, Vote::Up).await.unwrap();

        assert_eq!(note.title, "Thanks for the feedback!");
        assert_eq!(view.state().votes.get(Section::Prices), Some(Vote::Up));
    }

    #[tokio::test]
    async fn test_vote_after_cancel_keeps_local_state() {
        let mut view = view(Arc::new(MockPriceSource::new()), MockBackend::new());
        view.cancel();

        assert!(view.vote(Section::Meme, Vote::Down).await.is_none());
        assert_eq!(view.state().votes.get(Section::Meme), Some(Vote::Down));
    }

    #[test]
    fn test_drop_cancels_scope() {
        let view = view(Arc::new(MockPriceSource::new()), MockBackend::new());
        let handle = view.scope_handle();
        drop(view);
        assert!(handle.is_cancelled());
    }
}
