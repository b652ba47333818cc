use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::pages::PageContext;
use crate::report::{self, SentimentTally};
use crate::sentiment::{self, Lexicon, Sentiment};
use crate::types::view::{NoticeLevel, PageView, ViewBlock};

pub const TITLE: &str = "Realtime Tweets Analysis";

/// The one user-facing failure message the fetch path produces. The real
/// cause (network, auth, unknown handle) goes to the log, not the user.
const FETCH_FAILED: &str =
    "Failed to retrieve the tweets. Please check if the Twitter handle is correct.";

const WORD_CLOUD_LIMIT: usize = 50;

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RealtimeParams {
    handle: String,
    count: u32,
}

/// The fetch-and-classify pipeline: pull recent tweets for a handle,
/// normalize and score each one, and report bucket charts, word
/// frequencies and per-bucket listings.
pub fn render(ctx: &PageContext, params: &Value) -> Result<PageView, String> {
    let params: RealtimeParams = if params.is_null() {
        RealtimeParams::default()
    } else {
        serde_json::from_value(params.clone()).map_err(|e| format!("Invalid parameters: {}", e))?
    };

    let mut view = PageView::new(TITLE);
    view.markdown(
        "Analyzes a Twitter handle's recent tweets and reports the most common \
         words and the associated sentiments.\n\n\
         **Notes:**\n\
         - Private accounts / protected tweets are not accessible.\n\
         - Only the English language is supported for now.",
    );

    let handle = params.handle.trim().trim_start_matches('@').to_string();
    if handle.is_empty() || params.count == 0 {
        view.notice(
            NoticeLevel::Info,
            "Enter the Twitter handle and the number of tweets to analyze to get started.",
        );
        return Ok(view);
    }

    let timeline = match ctx
        .tweet_source()
        .and_then(|source| source.user_timeline(&handle, params.count))
    {
        Ok(timeline) => timeline,
        Err(e) => {
            warn!(handle = %handle, error = %e, "Tweet fetch failed");
            view.notice(NoticeLevel::Error, FETCH_FAILED);
            return Ok(view);
        }
    };

    let length = timeline.tweets.len();
    info!(handle = %handle, tweets = length, "Analyzing fetched timeline");
    if length == 0 {
        view.notice(
            NoticeLevel::Info,
            &format!("No tweets found for @{}.", handle),
        );
        return Ok(view);
    }

    if let Some(profile) = timeline.profile {
        view.notice(NoticeLevel::Success, "Twitter handle details:");
        view.push(ViewBlock::Profile { profile });
    }

    let lexicon = Lexicon::new();
    let records = sentiment::classify_records(&lexicon, timeline.tweets);
    let tally = SentimentTally::from_records(&records);

    view.notice(
        NoticeLevel::Success,
        &format!(
            "Sentiment analysis for @{} based on the last {} tweet(s)!",
            handle, length
        ),
    );
    view.push(ViewBlock::Chart {
        chart: tally.bar_chart("Sentiment Analysis"),
    });
    view.push(ViewBlock::Chart {
        chart: tally.pie_chart("Tweet Sentiments in Percentage"),
    });

    let words = report::word_frequencies(
        records.iter().map(|record| record.clean_text.as_str()),
        WORD_CLOUD_LIMIT,
    );
    if let Err(e) = report::export_json(&ctx.export_dir.join("cloud.json"), &words) {
        warn!(error = %e, "Failed to write word cloud export");
    }
    view.push(ViewBlock::WordFrequencies {
        title: "Word Cloud".to_string(),
        words,
    });

    view.push(ViewBlock::TweetList {
        title: format!("{} Latest Tweets", length),
        tweets: records.iter().map(|record| record.tweet.clone()).collect(),
    });
    for bucket in Sentiment::ALL {
        view.push(ViewBlock::TweetList {
            title: format!("{} Tweets", bucket),
            tweets: records
                .iter()
                .filter(|record| record.sentiment == bucket)
                .map(|record| record.tweet.clone())
                .collect(),
        });
    }

    Ok(view)
}
