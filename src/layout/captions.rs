use rand::seq::SliceRandom;
use rand::{Rng, RngCore};

use crate::config::CaptionConfig;

const DEFAULT_WORDS: &[&str] = &[
    "across", "afternoon", "always", "animal", "answer", "autumn", "balance", "beach", "before",
    "bridge", "bright", "camera", "career", "center", "city", "clear", "cloud", "coffee", "color",
    "country", "crowd", "culture", "dinner", "distance", "dream", "early", "energy", "evening",
    "family", "field", "forest", "friend", "garden", "glass", "golden", "green", "harbor",
    "history", "holiday", "island", "journey", "kitchen", "lake", "light", "market", "memory",
    "minute", "morning", "mountain", "music", "nature", "night", "north", "ocean", "orange",
    "paper", "party", "people", "picture", "place", "quiet", "river", "road", "season", "shadow",
    "simple", "sky", "smile", "snow", "south", "spring", "station", "stone", "story", "street",
    "summer", "sunset", "table", "today", "together", "tower", "travel", "tree", "valley",
    "village", "voice", "water", "weekend", "west", "window", "winter", "wonder", "world",
    "yellow", "young",
];

/// Produces short random captions for text regions.
#[derive(Debug, Clone)]
pub struct CaptionSource {
    words: Vec<String>,
    min_words: usize,
    max_words: usize,
}

impl Default for CaptionSource {
    fn default() -> Self {
        Self::from_config(&CaptionConfig::default())
    }
}

impl CaptionSource {
    pub fn from_config(config: &CaptionConfig) -> Self {
        let words: Vec<String> = match &config.words {
            Some(words) if !words.is_empty() => words.clone(),
            _ => DEFAULT_WORDS.iter().map(|w| w.to_string()).collect(),
        };
        let min_words = config.min_words.max(1);
        Self {
            words,
            min_words,
            max_words: config.max_words.max(min_words),
        }
    }

    pub fn caption(&self, rng: &mut dyn RngCore) -> String {
        let count = rng.gen_range(self.min_words..=self.max_words);
        let mut picked = Vec::with_capacity(count);
        for _ in 0..count {
            if let Some(word) = self.words.choose(rng) {
                picked.push(word.as_str());
            }
        }
        picked.join(" ")
    }
}
