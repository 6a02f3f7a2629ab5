//! Precomputed review dataset
//!
//! Reads the merged results CSV (`Time, Text, Sentiment, Detected_Emotions,
//! Adorescore, Main_Topic, Sub_Topic`). Only reviews from 2006 through 2015
//! are kept, and each review keeps only its first detected emotion.

use adorescore_core::{Error, Result};
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

/// First and last year kept on load
pub const FIRST_YEAR: i32 = 2006;
pub const LAST_YEAR: i32 = 2015;

const TIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(rename = "Time")]
    time: String,

    #[serde(rename = "Text", default)]
    text: String,

    #[serde(rename = "Sentiment", default)]
    sentiment: String,

    #[serde(rename = "Detected_Emotions", default)]
    detected_emotions: Option<String>,

    #[serde(rename = "Adorescore", default)]
    adorescore: Option<f64>,

    #[serde(rename = "Main_Topic", default)]
    main_topic: String,

    #[serde(rename = "Sub_Topic", default)]
    sub_topic: String,
}

/// One analysed review
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewRecord {
    pub time: NaiveDateTime,
    pub text: String,
    pub sentiment: String,
    pub emotion: Option<String>,
    pub adorescore: Option<f64>,
    pub main_topic: String,
    pub sub_topic: String,
}

/// Parse a `Time` cell as a timestamp or a bare date (midnight)
pub fn parse_time(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .map(|date| date.and_time(NaiveTime::MIN))
        })
}

/// Keep the first comma-separated emotion, trimmed
pub fn first_emotion(value: &str) -> String {
    value.split(',').next().unwrap_or_default().trim().to_string()
}

/// The loaded dataset
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<ReviewRecord>,
}

impl Dataset {
    pub fn new(records: Vec<ReviewRecord>) -> Self {
        Self { records }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| {
            Error::dataset(format!("Failed to open dataset {}: {}", path.display(), e))
        })?;
        let dataset = Self::from_reader(file)?;
        info!("Loaded {} reviews from {}", dataset.len(), path.display());
        Ok(dataset)
    }

    /// Parse CSV data. Rows with an unreadable `Time` are skipped.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::Reader::from_reader(reader);
        let mut records = Vec::new();
        let mut skipped = 0usize;

        for row in reader.deserialize() {
            let raw: RawRecord =
                row.map_err(|e| Error::dataset(format!("Failed to parse dataset row: {}", e)))?;

            let Some(time) = parse_time(&raw.time) else {
                skipped += 1;
                continue;
            };
            if !(FIRST_YEAR..=LAST_YEAR).contains(&time.year()) {
                continue;
            }

            records.push(ReviewRecord {
                time,
                text: raw.text,
                sentiment: raw.sentiment,
                emotion: raw.detected_emotions.as_deref().map(first_emotion),
                adorescore: raw.adorescore.filter(|v| v.is_finite()),
                main_topic: raw.main_topic,
                sub_topic: raw.sub_topic,
            });
        }

        if skipped > 0 {
            warn!("Skipped {} rows with an unreadable Time value", skipped);
        }
        Ok(Self { records })
    }

    pub fn records(&self) -> &[ReviewRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "\
Time,Text,Sentiment,Detected_Emotions,Adorescore,Main_Topic,Sub_Topic
2005-12-31 23:59:59,too early,Positive,joy,50,Delivery,fast
2006-01-01,first day,Positive,\"joy, surprise\",80,Delivery,fast
2012-06-15 10:30:00,broke fast,Negative,  sadness ,-45.5,Product Quality,broke
2015-12-31 23:00:00,last one,Neutral,,,Clothes,size
2016-01-01 00:00:00,too late,Negative,anger,-90,Delivery,late
not a date,garbage,Neutral,joy,0,Delivery,fast
";

    #[test]
    fn test_load_filters_years_and_reduces_emotions() {
        let dataset = Dataset::from_reader(CSV.as_bytes()).unwrap();
        assert_eq!(dataset.len(), 3);

        let records = dataset.records();
        assert_eq!(records[0].text, "first day");
        assert_eq!(records[0].emotion.as_deref(), Some("joy"));
        assert_eq!(records[1].emotion.as_deref(), Some("sadness"));
        assert_eq!(records[1].adorescore, Some(-45.5));
        assert_eq!(records[2].emotion, None);
        assert_eq!(records[2].adorescore, None);
    }

    #[test]
    fn test_parse_time_formats() {
        assert!(parse_time("2010-03-04 05:06:07").is_some());
        assert!(parse_time("2010-03-04T05:06:07").is_some());
        assert_eq!(
            parse_time("2010-03-04"),
            NaiveDate::from_ymd_opt(2010, 3, 4).map(|d| d.and_time(NaiveTime::MIN))
        );
        assert!(parse_time("04/03/2010").is_none());
    }

    #[test]
    fn test_first_emotion() {
        assert_eq!(first_emotion("joy, surprise"), "joy");
        assert_eq!(first_emotion(" fear "), "fear");
        assert_eq!(first_emotion(""), "");
    }

    #[test]
    fn test_missing_file_is_dataset_error() {
        let err = Dataset::load("/nonexistent/dataset.csv").unwrap_err();
        assert!(matches!(err, Error::Dataset(_)));
    }
}
