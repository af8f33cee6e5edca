use anyhow::Result;
use clap::Parser;
use dotenvy::dotenv;
use serde::Serialize;
use std::env;
use tracing::{debug, info, level_filters::LevelFilter};
use tracing_subscriber::EnvFilter;
use twitter_trends::cleaner::{self, CleanedTweet};
use twitter_trends::collector;
use twitter_trends::trends;
use twitter_trends::twitter_client::TwitterClient;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Exchange API credentials for a fresh bearer token before running
    #[arg(short, long)]
    login: bool,

    /// Yahoo WOEID of the location to pull trends for (1 = worldwide)
    #[arg(short, long, default_value_t = 1)]
    woeid: u64,

    /// Maximum number of trends to analyze
    #[arg(long, default_value_t = 5)]
    trend_limit: usize,

    /// Drop trends with a reported tweet volume below this
    #[arg(long, default_value_t = 10_000)]
    min_tweet_volume: u64,

    /// Drop promoted (sponsored) trends
    #[arg(long)]
    ignore_promoted_content: bool,

    /// Drop plain-text trends, keeping only hashtags
    #[arg(long)]
    ignore_text_trends: bool,

    /// Maximum number of tweets to collect per trend
    #[arg(long, default_value_t = 100)]
    max_tweet_count: usize,
}

#[derive(Debug, Serialize)]
struct TrendReport {
    trend: String,
    tweets: Vec<CleanedTweet>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    dotenv().ok();

    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let api_key = env::var("TWITTER_API_KEY")?;
    let api_secret = env::var("TWITTER_API_SECRET")?;
    let mut twitter_client = TwitterClient::new(&api_key, &api_secret);

    if args.login {
        twitter_client.authorize().await?;
        twitter_client.save_bearer_token()?;
    } else {
        twitter_client.load_bearer_token()?;
    }

    let trend_list = twitter_client.fetch_trends(args.woeid).await?;
    debug!(count = trend_list.len(), "trends received");

    let selected = trends::get_filtered_trends(
        trend_list,
        args.trend_limit,
        args.min_tweet_volume,
        args.ignore_promoted_content,
        args.ignore_text_trends,
    );
    info!(count = selected.len(), "trends selected for analysis");

    let mut reports = Vec::with_capacity(selected.len());
    for trend in &selected {
        let mut tweets =
            collector::get_tweets(&twitter_client, &trend.name, args.max_tweet_count).await?;
        trends::sort_by_retweets(&mut tweets);
        let cleaned = cleaner::get_cleaned_tweets(&tweets, trend)?;
        info!(trend = %trend.name, tweets = cleaned.len(), "trend collected");
        reports.push(TrendReport {
            trend: trend.name.clone(),
            tweets: cleaned,
        });
    }

    println!("{}", serde_json::to_string_pretty(&reports)?);
    Ok(())
}
