use std::fs::File;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::pages::PageContext;
use crate::report::{self, SentimentTally};
use crate::sentiment::Sentiment;
use crate::text;
use crate::types::view::{PageView, ViewBlock};

pub const TITLE: &str = "Tweets Dataset Analysis";

pub const DEFAULT_DATASET_PATH: &str = "train.csv";

const WORD_CLOUD_LIMIT: usize = 50;

/// One row of the labelled tweet dataset.
#[derive(Debug, Clone, Deserialize)]
pub struct DatasetRecord {
    #[serde(rename = "textID")]
    pub text_id: String,
    pub text: String,
    pub selected_text: String,
    pub sentiment: String,
}

/// Load the CSV dataset, dropping rows with any empty field.
pub fn load_dataset(path: &Path) -> Result<Vec<DatasetRecord>, String> {
    let file = File::open(path)
        .map_err(|e| format!("Failed to open dataset {}: {}", path.display(), e))?;
    let mut reader = csv::Reader::from_reader(file);
    let mut records = Vec::new();
    for result in reader.deserialize() {
        let record: DatasetRecord =
            result.map_err(|e| format!("Failed to parse dataset row: {}", e))?;
        if record.text.trim().is_empty()
            || record.selected_text.trim().is_empty()
            || record.sentiment.trim().is_empty()
        {
            continue;
        }
        records.push(record);
    }
    Ok(records)
}

/// Static analysis of the labelled dataset: label counts as a bar chart
/// and the most frequent words of the cleaned texts. Chart tables are also
/// written to the export directory for the display layer.
pub fn render(ctx: &PageContext, _params: &Value) -> Result<PageView, String> {
    let records = load_dataset(&ctx.dataset_path)?;
    info!(rows = records.len(), "Loaded sentiment dataset");

    let mut view = PageView::new(TITLE);
    view.markdown(
        "## Sentiment Analysis: Emotion in Text Tweets\n\
         Classifying emotions from text tweets. The dataset comes from the \
         [Tweet Sentiment Extraction](https://www.kaggle.com/competitions/tweet-sentiment-extraction/) \
         Kaggle competition.",
    );

    let mut tally = SentimentTally::new();
    for record in &records {
        if let Some(sentiment) = Sentiment::from_label(&record.sentiment) {
            tally.add(sentiment);
        }
    }
    let bar = tally.bar_chart("Comparison of Counts of Sentiments");
    if let Err(e) = report::export_json(&ctx.export_dir.join("sent_bar.json"), &bar) {
        warn!(error = %e, "Failed to write sentiment bar export");
    }
    view.push(ViewBlock::Chart { chart: bar });

    let cleaned: Vec<String> = records
        .iter()
        .map(|record| text::clean_dataset_text(&record.text))
        .collect();
    let words = report::word_frequencies(cleaned.iter().map(String::as_str), WORD_CLOUD_LIMIT);
    if let Err(e) = report::export_json(&ctx.export_dir.join("wordcd.json"), &words) {
        warn!(error = %e, "Failed to write word cloud export");
    }
    view.push(ViewBlock::WordFrequencies {
        title: "Wordcloud of Tweets".to_string(),
        words,
    });

    Ok(view)
}
