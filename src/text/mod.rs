pub mod stopwords;

pub use stopwords::is_stopword;

use std::sync::OnceLock;

use regex::Regex;

struct TweetPatterns {
    url: Regex,
    hashtag: Regex,
    mention: Regex,
    digit_word: Regex,
}

fn tweet_patterns() -> &'static TweetPatterns {
    static PATTERNS: OnceLock<TweetPatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| TweetPatterns {
        url: Regex::new(r"https?://\S+|www\.\S+").unwrap(),
        hashtag: Regex::new(r"#[A-Za-z0-9_]+").unwrap(),
        mention: Regex::new(r"@[A-Za-z0-9_]+").unwrap(),
        digit_word: Regex::new(r"\w*\d\w*").unwrap(),
    })
}

struct DatasetPatterns {
    bracketed: Regex,
    url: Regex,
    markup: Regex,
    punct: Regex,
    digit_word: Regex,
}

fn dataset_patterns() -> &'static DatasetPatterns {
    static PATTERNS: OnceLock<DatasetPatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| DatasetPatterns {
        bracketed: Regex::new(r"\[.*?\]").unwrap(),
        url: Regex::new(r"https?://\S+|www\.\S+").unwrap(),
        markup: Regex::new(r"<.*?>+").unwrap(),
        punct: Regex::new(r"[[:punct:]]").unwrap(),
        digit_word: Regex::new(r"\w*\d\w*").unwrap(),
    })
}

/// Normalize a raw tweet for scoring and word-frequency reporting.
///
/// Strips URLs, `#hashtag` tokens, `@mentions`, leftover `#` markers,
/// newlines, the literal "RT" marker and digit-containing tokens, then
/// drops 1-2 character tokens and stopwords and rejoins the remainder
/// with single spaces. Empty input yields empty output.
pub fn clean_tweet(text: &str) -> String {
    let patterns = tweet_patterns();
    let mut out = patterns.url.replace_all(text, "").into_owned();
    out = patterns.hashtag.replace_all(&out, " ").into_owned();
    out = patterns.mention.replace_all(&out, "").into_owned();
    out = out.replace('#', " ");
    out = out.replace('\n', " ");
    out = out.replace("RT", "");
    out = patterns.digit_word.replace_all(&out, "").into_owned();

    out.split_whitespace()
        .filter(|token| token.chars().count() > 2)
        .filter(|token| !is_stopword(token))
        .collect::<Vec<_>>()
        .join(" ")
}

/// The dataset page's cleaner. Lowercases, then strips bracketed spans,
/// URLs, `<...>` markup, punctuation, newlines and digit-containing
/// tokens. Intentionally a different pipeline than [`clean_tweet`]; the
/// two pages normalize differently and are kept that way.
pub fn clean_dataset_text(text: &str) -> String {
    let patterns = dataset_patterns();
    let mut out = text.to_lowercase();
    out = patterns.bracketed.replace_all(&out, "").into_owned();
    out = patterns.url.replace_all(&out, "").into_owned();
    out = patterns.markup.replace_all(&out, "").into_owned();
    out = patterns.punct.replace_all(&out, "").into_owned();
    out = out.replace('\n', "");
    out = patterns.digit_word.replace_all(&out, "").into_owned();

    out.split_whitespace().collect::<Vec<_>>().join(" ")
}
