use std::io;

use tracing::info;

use tweetwatch::pages::{self, PageContext};
use tweetwatch::server;

fn main() {
    tweetwatch::init_tracing();

    // Load .env from the working directory, if present. Credentials stay
    // unread until the realtime page first needs them.
    dotenvy::dotenv().ok();

    let registry = pages::default_registry();
    let ctx = PageContext::new();
    info!(pages = registry.titles().len(), "tweetwatch engine ready");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    if let Err(e) = server::serve(stdin.lock(), &mut stdout, &registry, &ctx) {
        eprintln!("tweetwatch: {}", e);
        std::process::exit(1);
    }
}
