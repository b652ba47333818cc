pub mod dataset;
pub mod home;
pub mod realtime;

use std::path::PathBuf;

use crate::router::PageRegistry;
use crate::twitter::{TweetSource, TwitterApi};

pub type SourceFactory = Box<dyn Fn() -> Result<Box<dyn TweetSource>, String>>;

/// Everything a page handler needs beyond its request parameters.
/// Constructed once at startup and shared by all pages.
pub struct PageContext {
    pub dataset_path: PathBuf,
    pub export_dir: PathBuf,
    source_factory: SourceFactory,
}

impl PageContext {
    /// Production context: dataset and chart exports live in the working
    /// directory, tweets come from the real Twitter client. The client is
    /// built per request, so missing credentials surface at first use of
    /// the realtime page rather than at startup.
    pub fn new() -> Self {
        let dataset_path = std::env::var("TWEETWATCH_DATASET")
            .unwrap_or_else(|_| dataset::DEFAULT_DATASET_PATH.to_string());
        Self {
            dataset_path: PathBuf::from(dataset_path),
            export_dir: PathBuf::from("."),
            source_factory: Box::new(|| {
                TwitterApi::from_env().map(|api| Box::new(api) as Box<dyn TweetSource>)
            }),
        }
    }

    pub fn with_dataset_path(mut self, path: PathBuf) -> Self {
        self.dataset_path = path;
        self
    }

    pub fn with_export_dir(mut self, dir: PathBuf) -> Self {
        self.export_dir = dir;
        self
    }

    pub fn with_source_factory(mut self, factory: SourceFactory) -> Self {
        self.source_factory = factory;
        self
    }

    pub fn tweet_source(&self) -> Result<Box<dyn TweetSource>, String> {
        (self.source_factory)()
    }
}

impl Default for PageContext {
    fn default() -> Self {
        Self::new()
    }
}

/// The dashboard's three pages, in the order the UI presents them.
pub fn default_registry() -> PageRegistry {
    let mut registry = PageRegistry::new();
    registry.register(home::TITLE, Box::new(home::render));
    registry.register(dataset::TITLE, Box::new(dataset::render));
    registry.register(realtime::TITLE, Box::new(realtime::render));
    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_registry_has_three_pages_in_order() {
        let registry = default_registry();
        assert_eq!(
            registry.titles(),
            vec![
                "Homepage",
                "Tweets Dataset Analysis",
                "Realtime Tweets Analysis"
            ]
        );
    }

    #[test]
    fn context_source_factory_is_called_lazily() {
        use std::cell::Cell;
        use std::rc::Rc;

        let calls = Rc::new(Cell::new(0u32));
        let calls_in_factory = Rc::clone(&calls);
        let ctx = PageContext::new().with_source_factory(Box::new(move || {
            calls_in_factory.set(calls_in_factory.get() + 1);
            Err("no source in this test".to_string())
        }));
        assert_eq!(calls.get(), 0);
        assert!(ctx.tweet_source().is_err());
        assert_eq!(calls.get(), 1);
    }
}
