use serde::{Deserialize, Deserializer, Serialize};

/// Bearer token from the app-only `oauth2/token` exchange.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BearerToken {
    pub token_type: String,
    pub access_token: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Trend {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub tweet_volume: Option<u64>,
    #[serde(default, deserialize_with = "de_promoted_content")]
    pub promoted_content: bool,
}

// The v1.1 API reports `promoted_content` as null for organic trends and as
// an object for sponsored ones, never as a plain bool.
fn de_promoted_content<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Bool(false)) => false,
        Some(_) => true,
    })
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TrendsResult {
    pub trends: Vec<Trend>,
}

/// Decode a `trends/place` body. The endpoint wraps its trends in a
/// one-element array; anything else (missing array, missing `trends` key)
/// counts as no trends rather than a hard failure.
pub fn parse_trends_body(body: &[u8]) -> Vec<Trend> {
    match serde_json::from_slice::<Vec<TrendsResult>>(body) {
        Ok(mut results) if !results.is_empty() => results.remove(0).trends,
        _ => Vec::new(),
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TweetUser {
    #[serde(default)]
    pub screen_name: Option<String>,
    #[serde(default)]
    pub followers_count: Option<u64>,
}

/// One raw search status. Fields the cleaner requires are optional here so a
/// single incomplete record surfaces as a cleaning error instead of failing
/// the decode of a whole page.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Status {
    #[serde(default)]
    pub created_at: Option<String>,
    pub text: String,
    #[serde(default)]
    pub retweet_count: Option<i64>,
    #[serde(default)]
    pub user: Option<TweetUser>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub statuses: Vec<Status>,
    #[serde(default)]
    pub search_metadata: Option<SearchMetadata>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SearchMetadata {
    #[serde(default)]
    pub next_results: Option<String>,
}
