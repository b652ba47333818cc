pub mod lexicon;

pub use lexicon::Lexicon;

use serde::{Deserialize, Serialize};

use crate::text;
use crate::types::record::{ClassifiedRecord, TweetRecord};

/// Threshold band used by the home-page demo classifier.
const COMPOUND_BAND: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    /// Display/reporting order for the three buckets.
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Neutral, Sentiment::Negative];

    /// Strict sign rule used by the realtime page: zero is the only
    /// neutral score, there is no dead zone around it.
    pub fn from_polarity(polarity: f64) -> Self {
        if polarity > 0.0 {
            Sentiment::Positive
        } else if polarity < 0.0 {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }

    /// Banded rule used by the home-page demo: scores within ±0.05 of
    /// zero are neutral. Deliberately different from [`from_polarity`];
    /// the two pages use different rules and are not reconciled.
    pub fn from_compound(compound: f64) -> Self {
        if compound >= COMPOUND_BAND {
            Sentiment::Positive
        } else if compound <= -COMPOUND_BAND {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }

    /// Parse a dataset label ("positive"/"neutral"/"negative", any case).
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "positive" => Some(Sentiment::Positive),
            "neutral" => Some(Sentiment::Neutral),
            "negative" => Some(Sentiment::Negative),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Neutral => "Neutral",
            Sentiment::Negative => "Negative",
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// The realtime pipeline: normalize each tweet, score it, bucket it.
/// Record order is preserved.
pub fn classify_records(lexicon: &Lexicon, tweets: Vec<TweetRecord>) -> Vec<ClassifiedRecord> {
    tweets
        .into_iter()
        .map(|tweet| {
            let clean_text = text::clean_tweet(&tweet.text);
            let polarity = lexicon.polarity(&clean_text);
            ClassifiedRecord {
                sentiment: Sentiment::from_polarity(polarity),
                clean_text,
                polarity,
                tweet,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn tweet(id: u64, text: &str) -> TweetRecord {
        TweetRecord {
            id,
            created_at: Utc.with_ymd_and_hms(2022, 6, 1, 12, 0, 0).unwrap(),
            text: text.to_string(),
        }
    }

    #[test]
    fn zero_polarity_is_neutral() {
        assert_eq!(Sentiment::from_polarity(0.0), Sentiment::Neutral);
    }

    #[test]
    fn positive_polarity_is_positive() {
        assert_eq!(Sentiment::from_polarity(0.3), Sentiment::Positive);
        assert_eq!(Sentiment::from_polarity(f64::MIN_POSITIVE), Sentiment::Positive);
    }

    #[test]
    fn negative_polarity_is_negative() {
        assert_eq!(Sentiment::from_polarity(-0.3), Sentiment::Negative);
        assert_eq!(Sentiment::from_polarity(-f64::MIN_POSITIVE), Sentiment::Negative);
    }

    #[test]
    fn classification_is_deterministic() {
        for score in [-1.0, -0.5, 0.0, 0.2, 1.0] {
            assert_eq!(Sentiment::from_polarity(score), Sentiment::from_polarity(score));
        }
    }

    #[test]
    fn compound_band_is_neutral() {
        assert_eq!(Sentiment::from_compound(0.049), Sentiment::Neutral);
        assert_eq!(Sentiment::from_compound(-0.049), Sentiment::Neutral);
        assert_eq!(Sentiment::from_compound(0.0), Sentiment::Neutral);
    }

    #[test]
    fn compound_band_edges_are_inclusive() {
        assert_eq!(Sentiment::from_compound(0.05), Sentiment::Positive);
        assert_eq!(Sentiment::from_compound(-0.05), Sentiment::Negative);
    }

    #[test]
    fn the_two_policies_disagree_near_zero() {
        // 0.02 is positive under the strict rule, neutral under the band.
        assert_eq!(Sentiment::from_polarity(0.02), Sentiment::Positive);
        assert_eq!(Sentiment::from_compound(0.02), Sentiment::Neutral);
    }

    #[test]
    fn labels_parse_case_insensitively() {
        assert_eq!(Sentiment::from_label("positive"), Some(Sentiment::Positive));
        assert_eq!(Sentiment::from_label("NEUTRAL"), Some(Sentiment::Neutral));
        assert_eq!(Sentiment::from_label(" negative "), Some(Sentiment::Negative));
        assert_eq!(Sentiment::from_label("angry"), None);
    }

    #[test]
    fn display_matches_bucket_names() {
        assert_eq!(Sentiment::Positive.to_string(), "Positive");
        assert_eq!(Sentiment::Negative.to_string(), "Negative");
    }

    #[test]
    fn pipeline_classifies_known_records() {
        let lexicon = Lexicon::new();
        let tweets = vec![
            tweet(1, "Absolutely loved the wonderful launch event!"),
            tweet(2, "This update is terrible, everything feels broken"),
            tweet(3, "The meeting starts on tuesday"),
        ];
        let records = classify_records(&lexicon, tweets);
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].sentiment, Sentiment::Positive);
        assert_eq!(records[1].sentiment, Sentiment::Negative);
        assert_eq!(records[2].sentiment, Sentiment::Neutral);
    }

    #[test]
    fn pipeline_preserves_order_and_input_text() {
        let lexicon = Lexicon::new();
        let tweets = vec![tweet(10, "great day"), tweet(20, "awful day")];
        let records = classify_records(&lexicon, tweets);
        assert_eq!(records[0].tweet.id, 10);
        assert_eq!(records[1].tweet.id, 20);
        assert_eq!(records[1].tweet.text, "awful day");
    }

    #[test]
    fn pipeline_sentiment_follows_polarity_sign() {
        let lexicon = Lexicon::new();
        let tweets = vec![
            tweet(1, "winning feels amazing"),
            tweet(2, "losing feels awful"),
            tweet(3, ""),
        ];
        for record in classify_records(&lexicon, tweets) {
            assert_eq!(record.sentiment, Sentiment::from_polarity(record.polarity));
        }
    }
}
