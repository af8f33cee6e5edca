pub mod api;

use crate::collector::{SearchPage, SearchParams, TweetSource};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use base64::Engine;
use hyper::client::HttpConnector;
use hyper::{Body, Client, Method, Request, StatusCode};
use hyper_tls::HttpsConnector;
use std::fs;
use tracing::debug;
use url::Url;

const API_BASE: &str = "https://api.twitter.com";
const BEARER_TOKEN_PATH: &str = "./var/.bearer_token";

#[derive(Debug, Clone)]
pub struct TwitterClient {
    https_client: Client<HttpsConnector<HttpConnector>>,
    api_key: String,
    api_secret: String,
    bearer_token: Option<api::BearerToken>,
}

impl TwitterClient {
    pub fn new(api_key: &str, api_secret: &str) -> Self {
        let https = HttpsConnector::new();
        let https_client = Client::builder().build::<_, hyper::Body>(https);
        Self {
            https_client,
            api_key: api_key.to_string(),
            api_secret: api_secret.to_string(),
            bearer_token: None,
        }
    }

    pub fn save_bearer_token(&self) -> Result<()> {
        let token = self
            .bearer_token
            .as_ref()
            .ok_or(anyhow!("No token to save"))?;
        fs::create_dir_all("./var")?;
        fs::write(BEARER_TOKEN_PATH, serde_json::to_string(token)?)?;
        Ok(())
    }

    pub fn load_bearer_token(&mut self) -> Result<()> {
        let token = fs::read_to_string(BEARER_TOKEN_PATH)?;
        self.bearer_token = Some(serde_json::from_str(&token)?);
        Ok(())
    }

    /// App-only auth: exchange the consumer key/secret for a bearer token.
    pub async fn authorize(&mut self) -> Result<()> {
        let credentials = base64::engine::general_purpose::STANDARD
            .encode(format!("{}:{}", self.api_key, self.api_secret));
        let req = Request::builder()
            .method(Method::POST)
            .uri(format!("{API_BASE}/oauth2/token"))
            .header("Authorization", format!("Basic {credentials}"))
            .header(
                "Content-Type",
                "application/x-www-form-urlencoded;charset=UTF-8",
            )
            .body(Body::from("grant_type=client_credentials"))?;

        let resp = self.https_client.request(req).await?;
        let status = resp.status();
        let body = hyper::body::to_bytes(resp.into_body()).await?;
        if !status.is_success() {
            return Err(anyhow!(
                "Token request failed ({status}): {}",
                String::from_utf8_lossy(&body)
            ));
        }

        let token: api::BearerToken = serde_json::from_slice(&body)?;
        if token.token_type != "bearer" {
            return Err(anyhow!("Expected bearer token, got `{}`", token.token_type));
        }
        self.bearer_token = Some(token);
        Ok(())
    }

    async fn get(&self, uri: &Url) -> Result<(StatusCode, hyper::body::Bytes)> {
        let access_token = self
            .bearer_token
            .as_ref()
            .ok_or(anyhow!("Unauthorized"))?;
        let req = Request::builder()
            .method(Method::GET)
            .uri(uri.to_string())
            .header(
                "Authorization",
                format!("Bearer {}", access_token.access_token),
            )
            .body(Body::empty())?;

        let resp = self.https_client.request(req).await?;
        let status = resp.status();
        let body = hyper::body::to_bytes(resp.into_body()).await?;
        Ok((status, body))
    }

    /// Trends for a Yahoo WOEID (1 = worldwide). A 2xx body that is not the
    /// expected `[ { trends: [...] } ]` envelope yields an empty list rather
    /// than an error; an HTTP-level failure is still an error.
    pub async fn fetch_trends(&self, woeid: u64) -> Result<Vec<api::Trend>> {
        let mut uri = Url::parse(&format!("{API_BASE}/1.1/trends/place.json"))?;
        uri.query_pairs_mut().append_pair("id", &woeid.to_string());

        let (status, body) = self.get(&uri).await?;
        if !status.is_success() {
            return Err(anyhow!(
                "Trends request failed ({status}): {}",
                String::from_utf8_lossy(&body)
            ));
        }

        let trends = api::parse_trends_body(&body);
        debug!(woeid, count = trends.len(), "trends page received");
        Ok(trends)
    }
}

#[async_trait]
impl TweetSource for TwitterClient {
    async fn fetch_tweets_page(&self, params: &SearchParams) -> Result<SearchPage> {
        let mut uri = Url::parse(&format!("{API_BASE}/1.1/search/tweets.json"))?;
        {
            let mut pairs = uri.query_pairs_mut();
            pairs.append_pair("q", &params.query);
            pairs.append_pair("count", &params.count.to_string());
            if let Some(max_id) = &params.max_id {
                pairs.append_pair("max_id", max_id);
            }
        }

        let (status, body) = self.get(&uri).await?;
        if !status.is_success() {
            return Err(anyhow!(
                "Search request failed ({status}): {}",
                String::from_utf8_lossy(&body)
            ));
        }

        let resp: api::SearchResponse = serde_json::from_slice(&body)?;
        Ok(SearchPage {
            statuses: resp.statuses,
            next_results: resp.search_metadata.and_then(|meta| meta.next_results),
        })
    }
}
