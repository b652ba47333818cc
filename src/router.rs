use serde_json::Value;
use tracing::debug;

use crate::pages::PageContext;
use crate::types::view::PageView;

pub type PageHandler = Box<dyn Fn(&PageContext, &Value) -> Result<PageView, String>>;

struct PageEntry {
    title: String,
    handler: PageHandler,
}

/// Ordered list of (title, handler) pairs, built once at startup and
/// passed to the server. Dispatch is by exact title, the same string the
/// UI shows in its page selector.
#[derive(Default)]
pub struct PageRegistry {
    pages: Vec<PageEntry>,
}

impl PageRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a page. Registration order is presentation order.
    pub fn register(&mut self, title: &str, handler: PageHandler) {
        self.pages.push(PageEntry {
            title: title.to_string(),
            handler,
        });
    }

    pub fn titles(&self) -> Vec<String> {
        self.pages.iter().map(|page| page.title.clone()).collect()
    }

    pub fn dispatch(
        &self,
        ctx: &PageContext,
        title: &str,
        params: &Value,
    ) -> Result<PageView, String> {
        let page = self
            .pages
            .iter()
            .find(|page| page.title == title)
            .ok_or_else(|| format!("Unknown page: '{}'", title))?;
        debug!(page = %title, "Dispatching page");
        (page.handler)(ctx, params)
    }
}
