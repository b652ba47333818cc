use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::sentiment::Sentiment;
use crate::types::record::ClassifiedRecord;

/// Bar palette: Positive, Neutral, Negative.
const BAR_COLORS: [&str; 3] = ["#23C945", "#2593C9", "#E0401A"];

/// Pie palette: Positive, Neutral, Negative.
const PIE_COLORS: [&str; 3] = ["#F5D216", "#003f5c", "#ff6361"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Bar,
    Pie,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartEntry {
    pub label: String,
    pub value: f64,
    pub color: String,
}

/// A chart-ready table. The UI (or the JSON export on disk) renders it;
/// nothing here draws pixels.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentimentChart {
    pub kind: ChartKind,
    pub title: String,
    pub entries: Vec<ChartEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordCount {
    pub word: String,
    pub count: u64,
}

/// Per-bucket record counts for one request. Rebuilt per request,
/// never persisted.
#[derive(Debug, Clone, Default)]
pub struct SentimentTally {
    counts: HashMap<Sentiment, usize>,
}

impl SentimentTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: &[ClassifiedRecord]) -> Self {
        let mut tally = Self::new();
        for record in records {
            tally.add(record.sentiment);
        }
        tally
    }

    pub fn add(&mut self, sentiment: Sentiment) {
        *self.counts.entry(sentiment).or_insert(0) += 1;
    }

    pub fn count(&self, sentiment: Sentiment) -> usize {
        self.counts.get(&sentiment).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Counts per bucket in display order, as a bar table.
    pub fn bar_chart(&self, title: &str) -> SentimentChart {
        let entries = Sentiment::ALL
            .iter()
            .zip(BAR_COLORS)
            .map(|(sentiment, color)| ChartEntry {
                label: sentiment.label().to_string(),
                value: self.count(*sentiment) as f64,
                color: color.to_string(),
            })
            .collect();
        SentimentChart {
            kind: ChartKind::Bar,
            title: title.to_string(),
            entries,
        }
    }

    /// Percentage per bucket in display order, as a pie table. An empty
    /// tally yields all-zero percentages.
    pub fn pie_chart(&self, title: &str) -> SentimentChart {
        let total = self.total();
        let entries = Sentiment::ALL
            .iter()
            .zip(PIE_COLORS)
            .map(|(sentiment, color)| {
                let value = if total == 0 {
                    0.0
                } else {
                    self.count(*sentiment) as f64 * 100.0 / total as f64
                };
                ChartEntry {
                    label: sentiment.label().to_string(),
                    value,
                    color: color.to_string(),
                }
            })
            .collect();
        SentimentChart {
            kind: ChartKind::Pie,
            title: title.to_string(),
            entries,
        }
    }
}

/// Word frequencies across already-normalized texts, most frequent first
/// (ties broken alphabetically), capped at `limit` entries. This is the
/// table behind the word clouds; rendering them is the display layer's job.
pub fn word_frequencies<'a, I>(texts: I, limit: usize) -> Vec<WordCount>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: HashMap<&str, u64> = HashMap::new();
    for text in texts {
        for word in text.split_whitespace() {
            *counts.entry(word).or_insert(0) += 1;
        }
    }
    let mut words: Vec<WordCount> = counts
        .into_iter()
        .map(|(word, count)| WordCount {
            word: word.to_string(),
            count,
        })
        .collect();
    words.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.word.cmp(&b.word)));
    words.truncate(limit);
    words
}

/// Write a chart or word-frequency table as pretty-printed JSON into the
/// working directory, the side channel the display layer picks files up from.
pub fn export_json<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    let file = File::create(path)
        .map_err(|e| format!("Failed to create export file {}: {}", path.display(), e))?;
    serde_json::to_writer_pretty(file, value)
        .map_err(|e| format!("Failed to write export file {}: {}", path.display(), e))?;
    Ok(())
}
