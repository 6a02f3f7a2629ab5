//! Review filters

use crate::dataset::{Dataset, ReviewRecord, FIRST_YEAR, LAST_YEAR};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Deserialize;

/// Sentiments selected when the caller does not choose any
pub const DEFAULT_SENTIMENTS: [&str; 3] = ["Positive", "Negative", "Neutral"];

/// Filter over the dataset. Every constraint is optional.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub sentiments: Vec<String>,

    /// `None` keeps every emotion, including rows without one
    pub emotions: Option<Vec<String>>,
    pub min_adorescore: f64,
    pub max_adorescore: f64,

    /// Case-insensitive substring of the main topic
    pub theme_search: Option<String>,
    pub themes: Vec<String>,
    pub subtopics: Vec<String>,
}

impl Default for Filter {
    fn default() -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(FIRST_YEAR, 1, 1).unwrap_or_default(),
            end: NaiveDate::from_ymd_opt(LAST_YEAR, 12, 31).unwrap_or_default(),
            sentiments: DEFAULT_SENTIMENTS.iter().map(|s| s.to_string()).collect(),
            emotions: None,
            min_adorescore: -100.0,
            max_adorescore: 100.0,
            theme_search: None,
            themes: Vec::new(),
            subtopics: Vec::new(),
        }
    }
}

impl Filter {
    /// Both date bounds are compared against midnight of that day
    fn bounds(&self) -> (NaiveDateTime, NaiveDateTime) {
        (
            self.start.and_time(NaiveTime::MIN),
            self.end.and_time(NaiveTime::MIN),
        )
    }

    pub fn in_date_range(&self, record: &ReviewRecord) -> bool {
        let (start, end) = self.bounds();
        record.time >= start && record.time <= end
    }

    pub fn matches(&self, record: &ReviewRecord) -> bool {
        if !self.in_date_range(record) {
            return false;
        }

        if !self.sentiments.iter().any(|s| s == &record.sentiment) {
            return false;
        }

        if let Some(emotions) = &self.emotions {
            match &record.emotion {
                Some(emotion) if emotions.contains(emotion) => {}
                _ => return false,
            }
        }

        match record.adorescore {
            Some(score) if score >= self.min_adorescore && score <= self.max_adorescore => {}
            _ => return false,
        }

        if let Some(search) = self.theme_search.as_deref().filter(|s| !s.is_empty()) {
            if !record
                .main_topic
                .to_lowercase()
                .contains(&search.to_lowercase())
            {
                return false;
            }
        }

        if !self.themes.is_empty() && !self.themes.contains(&record.main_topic) {
            return false;
        }

        if !self.subtopics.is_empty() && !self.subtopics.contains(&record.sub_topic) {
            return false;
        }

        true
    }

    /// Records passing the filter, in dataset order
    pub fn apply<'a>(&self, dataset: &'a Dataset) -> Vec<&'a ReviewRecord> {
        dataset.records().iter().filter(|r| self.matches(r)).collect()
    }
}

/// Query-string form of [`Filter`]; lists are comma-separated
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FilterQuery {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub sentiments: Option<String>,
    pub emotions: Option<String>,
    pub min_adorescore: Option<f64>,
    pub max_adorescore: Option<f64>,
    pub search: Option<String>,
    pub themes: Option<String>,
    pub subtopics: Option<String>,
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

impl From<FilterQuery> for Filter {
    fn from(query: FilterQuery) -> Self {
        let defaults = Filter::default();
        Self {
            start: query.start.unwrap_or(defaults.start),
            end: query.end.unwrap_or(defaults.end),
            sentiments: query
                .sentiments
                .as_deref()
                .map(split_list)
                .unwrap_or(defaults.sentiments),
            emotions: query.emotions.as_deref().map(split_list),
            min_adorescore: query.min_adorescore.unwrap_or(defaults.min_adorescore),
            max_adorescore: query.max_adorescore.unwrap_or(defaults.max_adorescore),
            theme_search: query.search.filter(|s| !s.trim().is_empty()),
            themes: query.themes.as_deref().map(split_list).unwrap_or_default(),
            subtopics: query.subtopics.as_deref().map(split_list).unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(time: &str, sentiment: &str, emotion: Option<&str>, score: Option<f64>, topic: &str, sub: &str) -> ReviewRecord {
        ReviewRecord {
            time: crate::dataset::parse_time(time).unwrap(),
            text: format!("{} review", topic),
            sentiment: sentiment.to_string(),
            emotion: emotion.map(str::to_string),
            adorescore: score,
            main_topic: topic.to_string(),
            sub_topic: sub.to_string(),
        }
    }

    fn dataset() -> Dataset {
        Dataset::new(vec![
            record("2008-05-01 12:00:00", "Positive", Some("joy"), Some(70.0), "Fast Delivery", "quick"),
            record("2010-02-02 08:00:00", "Negative", Some("anger"), Some(-60.0), "Late Delivery", "late"),
            record("2012-07-07 00:00:00", "Neutral", None, Some(0.0), "Clothes", "size"),
            record("2014-01-01 09:00:00", "Mixed", Some("joy"), Some(10.0), "Clothes", "fit"),
            record("2015-12-31 10:00:00", "Positive", Some("trust"), None, "Quality", "material"),
        ])
    }

    #[test]
    fn test_default_filter_drops_unknown_sentiment_and_missing_score() {
        let data = dataset();
        let kept = Filter::default().apply(&data);
        assert_eq!(kept.len(), 3);
        assert!(kept.iter().all(|r| r.sentiment != "Mixed"));
    }

    #[test]
    fn test_end_date_compares_against_midnight() {
        let data = dataset();
        let filter = Filter {
            start: NaiveDate::from_ymd_opt(2012, 7, 7).unwrap(),
            end: NaiveDate::from_ymd_opt(2012, 7, 7).unwrap(),
            ..Default::default()
        };
        let kept = filter.apply(&data);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].main_topic, "Clothes");
    }

    #[test]
    fn test_emotion_filter_excludes_rows_without_emotion() {
        let data = dataset();
        let filter = Filter {
            emotions: Some(vec!["joy".to_string(), "anger".to_string()]),
            ..Default::default()
        };
        assert_eq!(filter.apply(&data).len(), 2);
    }

    #[test]
    fn test_theme_search_is_case_insensitive() {
        let data = dataset();
        let filter = Filter {
            theme_search: Some("DELIVERY".to_string()),
            ..Default::default()
        };
        let kept = filter.apply(&data);
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn test_adorescore_range_is_inclusive() {
        let data = dataset();
        let filter = Filter {
            min_adorescore: -60.0,
            max_adorescore: 0.0,
            ..Default::default()
        };
        assert_eq!(filter.apply(&data).len(), 2);
    }

    #[test]
    fn test_theme_and_subtopic_selection() {
        let data = dataset();
        let filter = Filter {
            themes: vec!["Late Delivery".to_string(), "Clothes".to_string()],
            subtopics: vec!["size".to_string()],
            ..Default::default()
        };
        let kept = filter.apply(&data);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].sub_topic, "size");
    }

    #[test]
    fn test_query_conversion() {
        let query = FilterQuery {
            sentiments: Some("Positive, Negative".to_string()),
            emotions: Some("joy".to_string()),
            search: Some("  ".to_string()),
            max_adorescore: Some(50.0),
            ..Default::default()
        };
        let filter = Filter::from(query);
        assert_eq!(filter.sentiments, vec!["Positive", "Negative"]);
        assert_eq!(filter.emotions, Some(vec!["joy".to_string()]));
        assert_eq!(filter.theme_search, None);
        assert_eq!(filter.max_adorescore, 50.0);
        assert_eq!(filter.min_adorescore, -100.0);
    }
}
