use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::debug;

use crate::secrets::TwitterCredentials;
use crate::types::record::{TweetRecord, UserProfile};

/// Timeline window the remote API allows per request.
pub const MAX_TIMELINE_COUNT: u32 = 200;

const DEFAULT_API_BASE: &str = "https://api.twitter.com";

/// Format of the v1.1 `created_at` field, e.g. "Wed Oct 10 20:19:24 +0000 2018".
const CREATED_AT_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

/// Recent tweets of one account plus the profile metadata that rides
/// along with them. No tweets means no profile.
#[derive(Debug, Clone)]
pub struct UserTimeline {
    pub tweets: Vec<TweetRecord>,
    pub profile: Option<UserProfile>,
}

/// Where tweets come from. The realtime page only sees this seam; tests
/// substitute a fixture source.
pub trait TweetSource {
    fn user_timeline(&self, handle: &str, count: u32) -> Result<UserTimeline, String>;
}

/// Client of the Twitter REST API. Authentication is the application-only
/// bearer-token handshake; rate limiting stays with the remote API.
pub struct TwitterApi {
    client: reqwest::Client,
    runtime: tokio::runtime::Runtime,
    credentials: TwitterCredentials,
    base_url: String,
}

impl TwitterApi {
    pub fn from_env() -> Result<Self, String> {
        Self::new(TwitterCredentials::from_env()?)
    }

    pub fn new(credentials: TwitterCredentials) -> Result<Self, String> {
        Self::with_base_url(credentials, DEFAULT_API_BASE)
    }

    pub fn with_base_url(credentials: TwitterCredentials, base_url: &str) -> Result<Self, String> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| format!("Failed to start fetch runtime: {}", e))?;
        Ok(Self {
            client: reqwest::Client::new(),
            runtime,
            credentials,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn bearer_token(&self) -> Result<String, String> {
        #[derive(Deserialize)]
        struct OauthToken {
            access_token: String,
        }

        let response = self
            .client
            .post(format!("{}/oauth2/token", self.base_url))
            .basic_auth(&self.credentials.api_key, Some(&self.credentials.api_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(|e| format!("Failed to authenticate with Twitter: {}", e))?;

        if !response.status().is_success() {
            return Err(format!("Twitter auth error: {}", response.status()));
        }

        let token: OauthToken = response
            .json()
            .await
            .map_err(|e| format!("Failed to parse auth response: {}", e))?;
        Ok(token.access_token)
    }

    async fn fetch_timeline(&self, handle: &str, count: u32) -> Result<Vec<ApiTweet>, String> {
        let bearer = self.bearer_token().await?;

        let count = count.to_string();
        let response = self
            .client
            .get(format!("{}/1.1/statuses/user_timeline.json", self.base_url))
            .bearer_auth(bearer)
            .query(&[
                ("screen_name", handle),
                ("count", count.as_str()),
                ("tweet_mode", "extended"),
            ])
            .send()
            .await
            .map_err(|e| format!("Failed to fetch tweets: {}", e))?;

        if !response.status().is_success() {
            return Err(format!("Twitter API error: {}", response.status()));
        }

        response
            .json()
            .await
            .map_err(|e| format!("Failed to parse timeline: {}", e))
    }
}

impl TweetSource for TwitterApi {
    /// One fetch, no retries, no partial results: any failure along the
    /// way surfaces as a single error string for the page to report.
    fn user_timeline(&self, handle: &str, count: u32) -> Result<UserTimeline, String> {
        let count = clamp_count(count);
        if count == 0 {
            return Ok(UserTimeline {
                tweets: Vec::new(),
                profile: None,
            });
        }

        let api_tweets = self.runtime.block_on(self.fetch_timeline(handle, count))?;
        debug!(handle, fetched = api_tweets.len(), "Fetched user timeline");
        convert_timeline(api_tweets)
    }
}

fn clamp_count(count: u32) -> u32 {
    count.min(MAX_TIMELINE_COUNT)
}

#[derive(Debug, Deserialize)]
struct ApiTweet {
    id: u64,
    created_at: String,
    full_text: String,
    user: ApiUser,
}

#[derive(Debug, Deserialize)]
struct ApiUser {
    name: String,
    screen_name: String,
    description: Option<String>,
    profile_image_url_https: Option<String>,
}

fn parse_created_at(raw: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_str(raw, CREATED_AT_FORMAT)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("Failed to parse tweet timestamp '{}': {}", raw, e))
}

fn convert_timeline(api_tweets: Vec<ApiTweet>) -> Result<UserTimeline, String> {
    let profile = api_tweets.first().map(|tweet| UserProfile {
        name: tweet.user.name.clone(),
        handle: tweet.user.screen_name.clone(),
        description: tweet.user.description.clone().unwrap_or_default(),
        profile_image_url: tweet.user.profile_image_url_https.clone().unwrap_or_default(),
    });

    let mut tweets = Vec::with_capacity(api_tweets.len());
    for api_tweet in api_tweets {
        tweets.push(TweetRecord {
            id: api_tweet.id,
            created_at: parse_created_at(&api_tweet.created_at)?,
            text: api_tweet.full_text,
        });
    }

    Ok(UserTimeline { tweets, profile })
}
