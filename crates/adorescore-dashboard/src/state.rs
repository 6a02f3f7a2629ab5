use crate::client::AnalysisClient;
use crate::dataset::Dataset;
use std::sync::Arc;

/// Shared dashboard state; the dataset is read-only after load
#[derive(Clone)]
pub struct DashboardState {
    pub dataset: Arc<Dataset>,
    pub client: AnalysisClient,
}

impl DashboardState {
    pub fn new(dataset: Dataset, client: AnalysisClient) -> Self {
        Self {
            dataset: Arc::new(dataset),
            client,
        }
    }
}
