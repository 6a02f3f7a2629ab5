//! Adorescore dashboard
//!
//! Loads precomputed review results, filters and summarizes them, and
//! forwards ad-hoc text to the analysis API.

pub mod cli;
pub mod client;
pub mod dataset;
pub mod filter;
pub mod server;
pub mod state;
pub mod summary;

pub use client::{AnalysisClient, AnalysisDigest, ClientError, DEFAULT_ANALYZE_URL};
pub use dataset::{Dataset, ReviewRecord};
pub use filter::{Filter, FilterQuery};
pub use server::{build_app, run_server};
pub use state::DashboardState;
pub use summary::{summarize, theme_snippets, Summary, ThemeSnippets};
