use std::collections::{HashMap, HashSet};

/// Valences sit on a roughly -4..4 scale; scores are normalized to [-1, 1].
const MAX_VALENCE: f64 = 4.0;

/// Dampening applied to a valence when the preceding token negates it.
const NEGATION_SCALAR: f64 = -0.74;

/// Normalization constant for the compound score.
const COMPOUND_ALPHA: f64 = 15.0;

/// Lexicon-based sentiment analyzer.
///
/// Two scoring surfaces are exposed: [`Lexicon::polarity`], the mean signed
/// valence of lexicon hits, and [`Lexicon::compound`], a negation-aware
/// normalized valence sum. The dashboard's pages intentionally use different
/// scorers and thresholds; both live here.
pub struct Lexicon {
    valences: HashMap<&'static str, f64>,
    negations: HashSet<&'static str>,
}

impl Lexicon {
    pub fn new() -> Self {
        Self {
            valences: Self::build_valence_table(),
            negations: Self::build_negation_set(),
        }
    }

    /// Mean signed valence of the lexicon hits in `text`, in [-1, 1].
    /// Text with no lexicon hits scores exactly 0.0.
    pub fn polarity(&self, text: &str) -> f64 {
        let mut sum = 0.0;
        let mut hits = 0usize;
        for token in Self::tokens(text) {
            if let Some(valence) = self.valences.get(token.as_str()) {
                sum += valence / MAX_VALENCE;
                hits += 1;
            }
        }
        if hits == 0 {
            return 0.0;
        }
        (sum / hits as f64).clamp(-1.0, 1.0)
    }

    /// Negation-aware normalized valence sum in [-1, 1].
    pub fn compound(&self, text: &str) -> f64 {
        let tokens: Vec<String> = Self::tokens(text).collect();
        let mut sum = 0.0;
        for (i, token) in tokens.iter().enumerate() {
            let Some(&valence) = self.valences.get(token.as_str()) else {
                continue;
            };
            let negated = i > 0 && self.negations.contains(tokens[i - 1].as_str());
            sum += if negated {
                valence * NEGATION_SCALAR
            } else {
                valence
            };
        }
        if sum == 0.0 {
            return 0.0;
        }
        (sum / (sum * sum + COMPOUND_ALPHA).sqrt()).clamp(-1.0, 1.0)
    }

    fn tokens(text: &str) -> impl Iterator<Item = String> + '_ {
        text.split_whitespace().map(|raw| {
            raw.trim_matches(|c: char| !c.is_alphanumeric() && c != '\'')
                .to_lowercase()
        })
    }

    fn build_valence_table() -> HashMap<&'static str, f64> {
        [
            // Strong positives
            ("love", 3.2),
            ("loved", 2.9),
            ("loves", 2.7),
            ("amazing", 3.2),
            ("awesome", 3.1),
            ("excellent", 3.0),
            ("fantastic", 3.0),
            ("wonderful", 2.7),
            ("brilliant", 2.8),
            ("perfect", 2.7),
            ("outstanding", 2.8),
            ("incredible", 2.6),
            ("best", 3.2),
            ("delighted", 2.8),
            ("thrilled", 2.7),
            // Moderate positives
            ("great", 3.1),
            ("good", 1.9),
            ("happy", 2.7),
            ("happiness", 2.6),
            ("glad", 2.0),
            ("joy", 2.8),
            ("beautiful", 2.9),
            ("enjoy", 2.2),
            ("enjoyed", 2.3),
            ("nice", 1.8),
            ("fun", 2.3),
            ("excited", 2.2),
            ("exciting", 2.2),
            ("win", 2.8),
            ("winning", 2.4),
            ("won", 2.7),
            ("success", 2.7),
            ("successful", 2.6),
            ("proud", 2.1),
            ("smile", 1.5),
            ("thanks", 1.9),
            ("thank", 1.7),
            ("grateful", 2.3),
            ("congrats", 2.4),
            ("congratulations", 2.9),
            ("welcome", 2.0),
            ("cool", 1.3),
            ("like", 1.5),
            ("liked", 1.6),
            ("better", 1.9),
            ("improve", 1.5),
            ("improved", 1.9),
            ("hope", 1.9),
            ("hopeful", 2.3),
            ("positive", 2.4),
            ("strong", 2.3),
            ("support", 1.7),
            ("helpful", 1.9),
            ("interesting", 1.7),
            ("impressive", 2.4),
            ("recommend", 1.6),
            ("favorite", 2.0),
            ("safe", 1.8),
            ("free", 1.6),
            ("easy", 1.9),
            ("clean", 1.7),
            ("fresh", 1.3),
            // Strong negatives
            ("hate", -2.7),
            ("hated", -3.2),
            ("hates", -2.6),
            ("awful", -3.3),
            ("terrible", -3.1),
            ("horrible", -2.5),
            ("disgusting", -2.9),
            ("worst", -3.1),
            ("disaster", -3.1),
            ("furious", -2.7),
            ("dreadful", -2.8),
            ("pathetic", -2.6),
            ("useless", -1.8),
            ("garbage", -2.2),
            ("scam", -2.2),
            // Moderate negatives
            ("bad", -2.5),
            ("sad", -2.1),
            ("angry", -2.3),
            ("anger", -2.7),
            ("upset", -1.9),
            ("unhappy", -1.8),
            ("disappointed", -2.1),
            ("disappointing", -2.2),
            ("annoying", -1.9),
            ("annoyed", -1.8),
            ("boring", -1.3),
            ("bored", -1.3),
            ("broken", -1.8),
            ("fail", -2.3),
            ("failed", -2.3),
            ("failure", -2.5),
            ("lose", -1.9),
            ("losing", -2.0),
            ("lost", -1.6),
            ("problem", -1.7),
            ("problems", -1.7),
            ("wrong", -2.1),
            ("worse", -2.1),
            ("poor", -1.9),
            ("weak", -1.9),
            ("hurt", -2.2),
            ("pain", -2.3),
            ("cry", -2.0),
            ("crying", -2.2),
            ("fear", -2.2),
            ("afraid", -2.2),
            ("scared", -2.2),
            ("worried", -1.7),
            ("worry", -1.7),
            ("stress", -1.8),
            ("stressed", -1.9),
            ("tired", -1.3),
            ("sick", -2.0),
            ("slow", -1.2),
            ("expensive", -1.1),
            ("negative", -2.3),
            ("crash", -1.9),
            ("crashed", -1.9),
            ("bug", -1.4),
            ("bugs", -1.5),
            ("delay", -1.3),
            ("delayed", -1.5),
            ("cancelled", -1.6),
            ("blocked", -1.4),
            ("spam", -1.9),
        ]
        .into_iter()
        .collect()
    }

    fn build_negation_set() -> HashSet<&'static str> {
        [
            "not", "no", "never", "neither", "nor", "cannot", "can't", "don't", "dont",
            "doesn't", "doesnt", "didn't", "didnt", "isn't", "isnt", "wasn't", "wasnt",
            "won't", "wont", "wouldn't", "wouldnt", "shouldn't", "shouldnt", "couldn't",
            "couldnt", "ain't", "aint", "without", "hardly", "barely",
        ]
        .into_iter()
        .collect()
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::new()
    }
}
