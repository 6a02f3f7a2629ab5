//! Summary statistics over filtered reviews

use crate::dataset::ReviewRecord;
use serde::Serialize;
use std::collections::HashMap;

/// Snippets returned per theme
pub const SNIPPET_LIMIT: usize = 15;

/// A value and how often it occurs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Count {
    pub value: String,
    pub count: usize,
}

/// A count with its share of the filtered rows, in percent
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Share {
    pub value: String,
    pub count: usize,
    pub percentage: f64,
}

/// Everything the dashboard shows for one filter
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub total: usize,

    /// Mean Adorescore truncated toward zero, 0 when nothing matches
    pub gauge: i64,
    pub emotions: Vec<Count>,
    pub sentiments: Vec<Share>,
    pub top_emotion: Option<Share>,
    pub themes: Vec<Count>,
}

/// Reviews of one theme
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThemeSnippets {
    pub theme: String,
    pub total: usize,
    pub snippets: Vec<String>,
}

/// Occurrence counts, most frequent first, ties alphabetical
pub fn value_counts<'a>(values: impl Iterator<Item = &'a str>) -> Vec<Count> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for value in values {
        *counts.entry(value).or_insert(0) += 1;
    }

    let mut counts: Vec<Count> = counts
        .into_iter()
        .map(|(value, count)| Count {
            value: value.to_string(),
            count,
        })
        .collect();
    counts.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.value.cmp(&b.value)));
    counts
}

fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

pub fn gauge(records: &[&ReviewRecord]) -> i64 {
    let scores: Vec<f64> = records.iter().filter_map(|r| r.adorescore).collect();
    if scores.is_empty() {
        return 0;
    }
    (scores.iter().sum::<f64>() / scores.len() as f64).trunc() as i64
}

pub fn summarize(records: &[&ReviewRecord]) -> Summary {
    let total = records.len();

    let emotions = value_counts(records.iter().filter_map(|r| r.emotion.as_deref()));

    let sentiments = value_counts(records.iter().map(|r| r.sentiment.as_str()))
        .into_iter()
        .map(|c| Share {
            percentage: percentage(c.count, total),
            value: c.value,
            count: c.count,
        })
        .collect();

    let top_emotion = emotions.first().map(|c| Share {
        value: c.value.clone(),
        count: c.count,
        percentage: percentage(c.count, total),
    });

    Summary {
        total,
        gauge: gauge(records),
        emotions,
        sentiments,
        top_emotion,
        themes: value_counts(records.iter().map(|r| r.main_topic.as_str())),
    }
}

/// First [`SNIPPET_LIMIT`] review texts of a theme
pub fn theme_snippets(records: &[&ReviewRecord], theme: &str) -> ThemeSnippets {
    let matching: Vec<&&ReviewRecord> = records.iter().filter(|r| r.main_topic == theme).collect();
    ThemeSnippets {
        theme: theme.to_string(),
        total: matching.len(),
        snippets: matching
            .iter()
            .take(SNIPPET_LIMIT)
            .map(|r| r.text.clone())
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::parse_time;

    fn record(text: &str, sentiment: &str, emotion: &str, score: f64, topic: &str) -> ReviewRecord {
        ReviewRecord {
            time: parse_time("2010-01-01").unwrap(),
            text: text.to_string(),
            sentiment: sentiment.to_string(),
            emotion: Some(emotion.to_string()),
            adorescore: Some(score),
            main_topic: topic.to_string(),
            sub_topic: String::new(),
        }
    }

    fn sample() -> Vec<ReviewRecord> {
        vec![
            record("a", "Positive", "joy", 80.0, "Delivery"),
            record("b", "Negative", "anger", -55.0, "Quality"),
            record("c", "Positive", "joy", 40.0, "Delivery"),
            record("d", "Neutral", "trust", 0.0, "Delivery"),
        ]
    }

    #[test]
    fn test_summary() {
        let data = sample();
        let records: Vec<&ReviewRecord> = data.iter().collect();
        let summary = summarize(&records);

        assert_eq!(summary.total, 4);
        // (80 - 55 + 40 + 0) / 4 = 16.25
        assert_eq!(summary.gauge, 16);
        assert_eq!(summary.emotions[0], Count { value: "joy".to_string(), count: 2 });
        assert_eq!(summary.emotions[1].value, "anger");

        assert_eq!(summary.sentiments[0].value, "Positive");
        assert_eq!(summary.sentiments[0].percentage, 50.0);

        let top = summary.top_emotion.unwrap();
        assert_eq!(top.value, "joy");
        assert_eq!(top.percentage, 50.0);

        assert_eq!(summary.themes[0], Count { value: "Delivery".to_string(), count: 3 });
    }

    #[test]
    fn test_gauge_truncates_toward_zero() {
        let data = vec![
            record("a", "Negative", "anger", -10.0, "x"),
            record("b", "Negative", "anger", -5.0, "x"),
        ];
        let records: Vec<&ReviewRecord> = data.iter().collect();
        assert_eq!(gauge(&records), -7);
    }

    #[test]
    fn test_empty_summary() {
        let summary = summarize(&[]);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.gauge, 0);
        assert!(summary.top_emotion.is_none());
        assert!(summary.themes.is_empty());
    }

    #[test]
    fn test_theme_snippets_limit() {
        let data: Vec<ReviewRecord> = (0..20)
            .map(|i| record(&format!("review {}", i), "Positive", "joy", 10.0, "Delivery"))
            .collect();
        let records: Vec<&ReviewRecord> = data.iter().collect();

        let snippets = theme_snippets(&records, "Delivery");
        assert_eq!(snippets.total, 20);
        assert_eq!(snippets.snippets.len(), SNIPPET_LIMIT);
        assert_eq!(snippets.snippets[0], "review 0");

        assert_eq!(theme_snippets(&records, "Quality").total, 0);
    }
}
