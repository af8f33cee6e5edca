use crate::twitter_client::api::{Status, Trend};
use itertools::Itertools;
use std::cmp::Reverse;

/// Sort tweets in place, most-retweeted first. Ordering among equal counts is
/// not stable. Statuses with no reported count sort last.
pub fn sort_by_retweets(tweets: &mut [Status]) {
    tweets.sort_unstable_by_key(|tweet| Reverse(tweet.retweet_count.unwrap_or(i64::MIN)));
}

/// Filter trends by minimum discussion volume and content policy, then rank
/// by volume descending and keep at most `limit`.
///
/// A trend with no reported `tweet_volume` never passes the volume filter;
/// the API reports null for low-activity topics and those sit below any
/// threshold, zero included. Ordering among equal-volume trends is
/// unspecified.
pub fn get_filtered_trends(
    trends: Vec<Trend>,
    limit: usize,
    min_tweet_volume: u64,
    ignore_promoted_content: bool,
    ignore_text_trends: bool,
) -> Vec<Trend> {
    let filtered: Vec<Trend> = trends
        .into_iter()
        .filter(|trend| {
            trend
                .tweet_volume
                .map_or(false, |volume| volume >= min_tweet_volume)
                && (!ignore_promoted_content || !trend.promoted_content)
                && (!ignore_text_trends || trend.name.starts_with('#'))
        })
        .collect();

    let limit = limit.min(filtered.len());
    if limit == 0 {
        return Vec::new();
    }

    filtered
        .into_iter()
        .sorted_by_key(|trend| Reverse(trend.tweet_volume.unwrap_or(0)))
        .take(limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trend(name: &str, tweet_volume: Option<u64>, promoted_content: bool) -> Trend {
        Trend {
            name: name.to_string(),
            url: format!("http://twitter.com/search?q={name}"),
            tweet_volume,
            promoted_content,
        }
    }

    fn status(retweet_count: Option<i64>) -> Status {
        Status {
            created_at: None,
            text: String::new(),
            retweet_count,
            user: None,
        }
    }

    #[test]
    fn excludes_promoted_and_text_trends_when_both_flags_set() {
        let trends = vec![
            trend("#A", Some(100), false),
            trend("B", Some(50), true),
        ];
        let result = get_filtered_trends(trends, 5, 10, true, true);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "#A");
    }

    #[test]
    fn flags_apply_independently() {
        let trends = vec![
            trend("#promoted", Some(100), true),
            trend("plain text", Some(100), false),
            trend("#organic", Some(100), false),
        ];

        let no_promoted = get_filtered_trends(trends.clone(), 5, 0, true, false);
        assert_eq!(no_promoted.len(), 2);
        assert!(no_promoted.iter().all(|t| !t.promoted_content));

        let hashtags_only = get_filtered_trends(trends.clone(), 5, 0, false, true);
        assert_eq!(hashtags_only.len(), 2);
        assert!(hashtags_only.iter().all(|t| t.name.starts_with('#')));

        let volume_only = get_filtered_trends(trends, 5, 0, false, false);
        assert_eq!(volume_only.len(), 3);
    }

    #[test]
    fn null_volume_is_below_any_threshold() {
        let trends = vec![trend("#quiet", None, false), trend("#loud", Some(1), false)];
        let result = get_filtered_trends(trends, 5, 0, false, false);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "#loud");
    }

    #[test]
    fn output_is_sorted_descending_and_truncated() {
        let trends = vec![
            trend("#c", Some(30), false),
            trend("#a", Some(100), false),
            trend("#b", Some(60), false),
            trend("#d", Some(10), false),
        ];
        let result = get_filtered_trends(trends, 3, 0, false, false);
        let volumes: Vec<u64> = result.iter().filter_map(|t| t.tweet_volume).collect();
        assert_eq!(volumes, vec![100, 60, 30]);
    }

    #[test]
    fn limit_is_clamped_to_filtered_count() {
        let trends = vec![trend("#a", Some(100), false)];
        let result = get_filtered_trends(trends, 10, 0, false, false);
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(get_filtered_trends(Vec::new(), 10, 0, true, true).is_empty());
    }

    #[test]
    fn zero_limit_yields_empty_output() {
        let trends = vec![trend("#a", Some(100), false)];
        assert!(get_filtered_trends(trends, 0, 0, false, false).is_empty());
    }

    #[test]
    fn sort_by_retweets_is_non_increasing() {
        let mut tweets = vec![status(Some(3)), status(Some(10)), status(None), status(Some(7))];
        sort_by_retweets(&mut tweets);
        let counts: Vec<Option<i64>> = tweets.iter().map(|t| t.retweet_count).collect();
        assert_eq!(counts, vec![Some(10), Some(7), Some(3), None]);
    }

    #[test]
    fn sort_by_retweets_empty_is_empty() {
        let mut tweets: Vec<Status> = Vec::new();
        sort_by_retweets(&mut tweets);
        assert!(tweets.is_empty());
    }
}
