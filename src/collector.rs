use crate::twitter_client::api;
use anyhow::Result;
use async_trait::async_trait;
use tracing::debug;

/// The search endpoint serves at most this many statuses per request.
pub const PAGE_LIMIT: usize = 100;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchParams {
    pub query: String,
    pub count: usize,
    pub max_id: Option<String>,
}

/// One page of search results plus the raw `next_results` query fragment
/// the next request's cursor is parsed from.
#[derive(Clone, Debug)]
pub struct SearchPage {
    pub statuses: Vec<api::Status>,
    pub next_results: Option<String>,
}

#[async_trait]
pub trait TweetSource {
    async fn fetch_tweets_page(&self, params: &SearchParams) -> Result<SearchPage>;
}

/// Gather up to `max_tweet_count` tweets matching `query`, walking the search
/// API's `max_id` cursor one page at a time. Each request depends on the
/// previous response's cursor, so pages are fetched strictly in sequence.
/// Returns fewer tweets if the feed runs out first. Any fetch error fails the
/// whole call; pages already gathered are discarded.
pub async fn get_tweets<S>(
    source: &S,
    query: &str,
    max_tweet_count: usize,
) -> Result<Vec<api::Status>>
where
    S: TweetSource + ?Sized,
{
    let mut tweets: Vec<api::Status> = Vec::new();
    let mut remaining = max_tweet_count;
    let mut max_id: Option<String> = None;

    while remaining > 0 {
        let params = SearchParams {
            query: query.to_string(),
            count: remaining.min(PAGE_LIMIT),
            max_id: max_id.take(),
        };
        let page = source.fetch_tweets_page(&params).await?;
        if page.statuses.is_empty() {
            break;
        }

        // Cap at `remaining` even if the page overshot the requested count.
        let taken = page.statuses.len().min(remaining);
        tweets.extend(page.statuses.into_iter().take(taken));
        remaining -= taken;
        debug!(query, accumulated = tweets.len(), remaining, "fetched page");

        match page.next_results.as_deref().and_then(parse_max_id) {
            Some(id) => max_id = Some(id),
            // The API omits `next_results` on the last page of results.
            None => break,
        }
    }

    Ok(tweets)
}

/// Pull the `max_id` token out of a `search_metadata.next_results` fragment,
/// e.g. `?max_id=1060000000000000000&q=%23rust&count=100&include_entities=1`.
pub fn parse_max_id(fragment: &str) -> Option<String> {
    let fragment = fragment.strip_prefix('?').unwrap_or(fragment);
    url::form_urlencoded::parse(fragment.as_bytes())
        .find(|(key, _)| key == "max_id")
        .map(|(_, value)| value.into_owned())
}
