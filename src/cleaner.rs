use crate::twitter_client::api::{Status, Trend};
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

/// v1.1 timestamps look like `Wed Oct 10 20:19:24 +0000 2018`.
const CREATED_AT_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

#[derive(Debug, Error, PartialEq, Eq)]
#[error("malformed tweet: missing or invalid `{field}`")]
pub struct MalformedTweetError {
    pub field: &'static str,
}

/// Flat analysis record: one raw status joined with the trend it was
/// collected for.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanedTweet {
    pub tweet_time: DateTime<Utc>,
    pub trend_hashtag: String,
    pub tweet_volume: Option<u64>,
    pub tweet_text: String,
    pub username: String,
    pub followers_count: u64,
    pub retweet_count: i64,
}

/// Project raw search statuses into analysis records, each attributed to the
/// one trend they were fetched for. Input order is preserved. A status with a
/// required field missing fails the whole batch rather than being defaulted;
/// downstream consumers assume complete records.
pub fn get_cleaned_tweets(
    tweets: &[Status],
    trend: &Trend,
) -> Result<Vec<CleanedTweet>, MalformedTweetError> {
    tweets.iter().map(|tweet| clean(tweet, trend)).collect()
}

fn clean(tweet: &Status, trend: &Trend) -> Result<CleanedTweet, MalformedTweetError> {
    let created_at = tweet
        .created_at
        .as_deref()
        .ok_or(MalformedTweetError { field: "created_at" })?;
    let tweet_time = DateTime::parse_from_str(created_at, CREATED_AT_FORMAT)
        .map_err(|_| MalformedTweetError { field: "created_at" })?
        .with_timezone(&Utc);
    let user = tweet
        .user
        .as_ref()
        .ok_or(MalformedTweetError { field: "user" })?;
    let username = user
        .screen_name
        .clone()
        .ok_or(MalformedTweetError { field: "user.screen_name" })?;
    let followers_count = user
        .followers_count
        .ok_or(MalformedTweetError { field: "user.followers_count" })?;
    let retweet_count = tweet
        .retweet_count
        .ok_or(MalformedTweetError { field: "retweet_count" })?;

    Ok(CleanedTweet {
        tweet_time,
        trend_hashtag: trend.name.clone(),
        tweet_volume: trend.tweet_volume,
        tweet_text: tweet.text.clone(),
        username,
        followers_count,
        retweet_count,
    })
}
