use serde::{Deserialize, Serialize};

use crate::report::{SentimentChart, WordCount};
use crate::types::record::{TweetRecord, UserProfile};

/// Severity of a user-facing notice. Maps onto the UI's message styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

/// One renderable block of a page. The UI walks the list top to bottom.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ViewBlock {
    Markdown {
        text: String,
    },
    Notice {
        level: NoticeLevel,
        text: String,
    },
    Profile {
        profile: UserProfile,
    },
    Chart {
        chart: SentimentChart,
    },
    WordFrequencies {
        title: String,
        words: Vec<WordCount>,
    },
    TweetList {
        title: String,
        tweets: Vec<TweetRecord>,
    },
}

/// Uniform result type every page handler returns.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageView {
    pub title: String,
    pub blocks: Vec<ViewBlock>,
}

impl PageView {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            blocks: Vec::new(),
        }
    }

    pub fn push(&mut self, block: ViewBlock) {
        self.blocks.push(block);
    }

    pub fn markdown(&mut self, text: &str) {
        self.push(ViewBlock::Markdown {
            text: text.to_string(),
        });
    }

    pub fn notice(&mut self, level: NoticeLevel, text: &str) {
        self.push(ViewBlock::Notice {
            level,
            text: text.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notice_level_serializes_snake_case() {
        let json = serde_json::to_string(&NoticeLevel::Success).unwrap();
        assert_eq!(json, "\"success\"");
    }

    #[test]
    fn view_blocks_are_tagged_by_type() {
        let mut view = PageView::new("Homepage");
        view.markdown("# About");
        view.notice(NoticeLevel::Info, "Enter text to get started.");
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["title"], "Homepage");
        assert_eq!(json["blocks"][0]["type"], "markdown");
        assert_eq!(json["blocks"][1]["type"], "notice");
        assert_eq!(json["blocks"][1]["level"], "info");
    }

    #[test]
    fn page_view_roundtrip() {
        let mut view = PageView::new("Realtime Tweets Analysis");
        view.notice(NoticeLevel::Error, "fetch failed");
        let json = serde_json::to_string(&view).unwrap();
        let parsed: PageView = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.title, view.title);
        assert_eq!(parsed.blocks.len(), 1);
    }
}
