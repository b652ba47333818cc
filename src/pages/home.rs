use serde_json::Value;

use crate::pages::PageContext;
use crate::sentiment::{Lexicon, Sentiment};
use crate::types::view::{NoticeLevel, PageView};

pub const TITLE: &str = "Homepage";

/// Landing page: a short introduction plus an ad-hoc sentiment demo over
/// whatever text the user typed. The demo uses the banded compound
/// classifier, not the realtime page's strict sign rule.
pub fn render(_ctx: &PageContext, params: &Value) -> Result<PageView, String> {
    let mut view = PageView::new(TITLE);
    view.markdown(
        "## About\n\
         This is the homepage of the sentiment analysis dashboard. \
         Select a page from the selector to get started, or try the demo below.",
    );
    view.markdown("## Sentiment Analysis Demo\nEnter text to find its sentiment.");

    let text = params.get("text").and_then(|t| t.as_str()).unwrap_or("");
    if !text.is_empty() {
        let lexicon = Lexicon::new();
        let compound = lexicon.compound(text);
        let (level, label) = match Sentiment::from_compound(compound) {
            Sentiment::Positive => (NoticeLevel::Success, "Positive"),
            Sentiment::Negative => (NoticeLevel::Error, "Negative"),
            Sentiment::Neutral => (NoticeLevel::Info, "Neutral"),
        };
        view.notice(level, label);
    }

    Ok(view)
}
