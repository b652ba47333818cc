use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::sentiment::Sentiment;

/// One fetched tweet. Immutable once constructed; lives for a single request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TweetRecord {
    pub id: u64,
    pub created_at: DateTime<Utc>,
    pub text: String,
}

/// A tweet plus everything the pipeline derived from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedRecord {
    pub tweet: TweetRecord,
    pub clean_text: String,
    pub polarity: f64,
    pub sentiment: Sentiment,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    pub handle: String,
    pub description: String,
    pub profile_image_url: String,
}
