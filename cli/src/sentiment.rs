//! Word-list sentiment scoring of article text.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static WORD: Lazy<Regex> = Lazy::new(|| Regex::new("[a-z]+").expect("invalid word regex"));

/// Lowercase ASCII-letter runs, in order of appearance.
pub fn words(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    WORD.find_iter(&lower).map(|m| m.as_str().to_string()).collect()
}

/// A word list file's contents as a set of words.
pub fn parse_word_list(text: &str) -> HashSet<String> {
    words(text).into_iter().collect()
}

/// Word counts split into content words and stop words.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WordFrequency {
    pub content: BTreeMap<String, usize>,
    pub stop: BTreeMap<String, usize>,
}

impl WordFrequency {
    pub fn content_total(&self) -> usize {
        self.content.values().sum()
    }

    pub fn stop_total(&self) -> usize {
        self.stop.values().sum()
    }
}

/// Count every word, routing stop words into their own table.
pub fn frequency(text: &str, stop_words: &HashSet<String>) -> WordFrequency {
    let mut freq = WordFrequency::default();
    for word in words(text) {
        let bucket = if stop_words.contains(&word) {
            &mut freq.stop
        } else {
            &mut freq.content
        };
        *bucket.entry(word).or_insert(0) += 1;
    }
    freq
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        })
    }
}

/// Positive and negative vocabularies. Positive is consulted first.
#[derive(Debug, Clone, Default)]
pub struct WordLists {
    pub positive: HashSet<String>,
    pub negative: HashSet<String>,
}

impl WordLists {
    pub fn from_texts(positive: &str, negative: &str) -> Self {
        Self {
            positive: parse_word_list(positive),
            negative: parse_word_list(negative),
        }
    }

    pub fn classify(&self, word: &str) -> Sentiment {
        if self.positive.contains(word) {
            Sentiment::Positive
        } else if self.negative.contains(word) {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SentimentCounts {
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
}

impl SentimentCounts {
    /// Positive unless negative words strictly outnumber positive ones.
    pub fn verdict(&self) -> Sentiment {
        if self.negative > self.positive {
            Sentiment::Negative
        } else {
            Sentiment::Positive
        }
    }
}

/// Sentiment summary for one city's article.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CitySentiment {
    pub city: String,
    pub word_count: usize,
    pub stop_word_count: usize,
    pub counts: SentimentCounts,
    pub verdict: Sentiment,
}

impl CitySentiment {
    pub fn summary(&self) -> String {
        format!("{} political situation", self.verdict)
    }
}

/// Score every word of the article, stop words included.
pub fn analyze_article(
    city: &str,
    text: &str,
    lists: &WordLists,
    stop_words: &HashSet<String>,
) -> CitySentiment {
    let freq = frequency(text, stop_words);
    let mut counts = SentimentCounts::default();
    for word in words(text) {
        match lists.classify(&word) {
            Sentiment::Positive => counts.positive += 1,
            Sentiment::Negative => counts.negative += 1,
            Sentiment::Neutral => counts.neutral += 1,
        }
    }

    CitySentiment {
        city: city.to_string(),
        word_count: freq.content_total(),
        stop_word_count: freq.stop_total(),
        counts,
        verdict: counts.verdict(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(words: &[&str]) -> HashSet<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_words_lowercase_ascii_runs() {
        assert_eq!(
            words("Hello, World! It's 2019 -- re-elected."),
            vec!["hello", "world", "it", "s", "re", "elected"]
        );
        assert!(words("123 !!!").is_empty());
    }

    #[test]
    fn test_frequency_splits_stop_words() {
        let freq = frequency("The vote and the result", &set(&["the", "and"]));
        assert_eq!(freq.stop["the"], 2);
        assert_eq!(freq.stop["and"], 1);
        assert_eq!(freq.content["vote"], 1);
        assert_eq!(freq.content_total(), 2);
        assert_eq!(freq.stop_total(), 3);
    }

    #[test]
    fn test_classify_prefers_positive() {
        let lists = WordLists {
            positive: set(&["good", "fair"]),
            negative: set(&["bad", "fair"]),
        };
        assert_eq!(lists.classify("good"), Sentiment::Positive);
        assert_eq!(lists.classify("fair"), Sentiment::Positive);
        assert_eq!(lists.classify("bad"), Sentiment::Negative);
        assert_eq!(lists.classify("table"), Sentiment::Neutral);
    }

    #[test]
    fn test_word_list_parsing() {
        let lists = WordLists::from_texts("Good\nGreat\n", "bad\nAWFUL\n");
        assert!(lists.positive.contains("great"));
        assert!(lists.negative.contains("awful"));
    }

    #[test]
    fn test_analyze_article() {
        let lists = WordLists::from_texts("win peace", "crisis war");
        let report = analyze_article(
            "Delhi",
            "The crisis deepened as war loomed; peace talks stalled.",
            &lists,
            &set(&["the", "as"]),
        );
        assert_eq!(report.counts.negative, 2);
        assert_eq!(report.counts.positive, 1);
        assert_eq!(report.counts.neutral, 6);
        assert_eq!(report.word_count, 7);
        assert_eq!(report.stop_word_count, 2);
        assert_eq!(report.verdict, Sentiment::Negative);
        assert_eq!(report.summary(), "negative political situation");
    }

    #[test]
    fn test_tie_is_positive() {
        let counts = SentimentCounts {
            positive: 3,
            neutral: 10,
            negative: 3,
        };
        assert_eq!(counts.verdict(), Sentiment::Positive);
        assert_eq!(SentimentCounts::default().verdict(), Sentiment::Positive);
    }
}
