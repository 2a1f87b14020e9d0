//! Geocode source backed by recorded provider responses
//!
//! The file is a JSON object keyed by full address, each value being the raw
//! provider response captured for that address:
//!
//! ```json
//! { "503 Hillcrest Point NW, Edmonton, AB, Canada": { "status": "OK", "results": [...] } }
//! ```

use crate::domain::AddressCandidate;
use crate::services::dispatch::GeocodeSource;
use anyhow::Context;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::info;

pub struct RecordedResponses {
    responses: HashMap<String, Value>,
}

impl RecordedResponses {
    pub fn new(responses: HashMap<String, Value>) -> Self {
        Self { responses }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read responses file {}", path.display()))?;
        let responses: HashMap<String, Value> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse responses file {}", path.display()))?;

        info!(file = %path.display(), responses = %responses.len(), "recorded_responses_loaded");
        Ok(Self::new(responses))
    }

    pub fn len(&self) -> usize {
        self.responses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }
}

#[async_trait]
impl GeocodeSource for RecordedResponses {
    async fn lookup(&self, candidate: &AddressCandidate) -> anyhow::Result<Option<Value>> {
        Ok(self.responses.get(&candidate.full_address).cloned())
    }
}
