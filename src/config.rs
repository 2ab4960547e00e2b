//! Analysis settings supplied by the embedding application.

use serde::{Deserialize, Serialize};

use crate::{compute::MIN_NUM_THREADS, error::Result, window::TimeWindow};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Worker threads used for the shortest path and betweenness searches, clamped to
    /// `1..=128`.
    pub num_threads: usize,
    /// The window to measure, derived from the graph's timestamps when absent.
    pub window: Option<TimeWindow>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            num_threads: MIN_NUM_THREADS,
            window: None,
        }
    }
}

impl AnalysisConfig {
    /// Parses a configuration from JSON, missing fields take their default value.
    ///
    /// # Examples
    ///
    /// ```
    /// use followgraph::config::AnalysisConfig;
    /// use followgraph::window::TimeWindow;
    ///
    /// let config = AnalysisConfig::from_json(r#"{"window": {"start": 0, "end": 200}}"#).unwrap();
    /// assert_eq!(config.num_threads, 1);
    /// assert_eq!(config.window, Some(TimeWindow::new(0, 200)));
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_window(mut self, window: TimeWindow) -> Self {
        self.window = Some(window);
        self
    }

    pub fn with_threads(mut self, num_threads: usize) -> Self {
        self.num_threads = num_threads;
        self
    }
}
