//! Fan-out / fan-in of the classification stage
//!
//! Each candidate is looked up and classified independently, at most
//! `concurrency` at a time. The candidate travels with its own lookup, so a
//! response can never be joined to the wrong address. `classify_all` returns
//! only once every candidate has a record (the batch barrier aggregation
//! needs), and always in canonical candidate order.

use crate::domain::{AddressCandidate, ClassifiedAddress, ProviderResponse};
use crate::infra::Metrics;
use crate::services::classifier::AddressClassifier;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

/// Where provider responses come from (live API, recorded file, test double).
///
/// `Ok(None)` means the provider has nothing for this candidate. Errors and
/// timeouts are reported as `Err` and end up classified `not_found`; retry
/// policy belongs to the implementation, not to the pipeline.
#[async_trait]
pub trait GeocodeSource: Send + Sync {
    async fn lookup(&self, candidate: &AddressCandidate) -> anyhow::Result<Option<Value>>;
}

async fn classify_one<S, C>(
    source: &S,
    classifier: &C,
    candidate: &AddressCandidate,
    metrics: &Metrics,
) -> ClassifiedAddress
where
    S: GeocodeSource + ?Sized,
    C: AddressClassifier + ?Sized,
{
    let raw = match source.lookup(candidate).await {
        Ok(raw) => raw,
        Err(e) => {
            warn!(address = %candidate.full_address, error = %e, "geocode_lookup_failed");
            metrics.record_source_error();
            None
        }
    };
    if raw.is_none() {
        metrics.record_missing_response();
    }

    let response = raw.as_ref().and_then(ProviderResponse::from_value);
    let record = classifier.classify(candidate, response.as_ref());
    metrics.record_classification(record.geocode_status);
    record
}

/// Classify every candidate concurrently and wait for all of them
pub async fn classify_all<S, C>(
    source: Arc<S>,
    classifier: Arc<C>,
    candidates: &[AddressCandidate],
    concurrency: usize,
    metrics: Arc<Metrics>,
) -> Vec<ClassifiedAddress>
where
    S: GeocodeSource + ?Sized + 'static,
    C: AddressClassifier + 'static,
{
    let semaphore = Arc::new(Semaphore::new(concurrency.max(1)));
    let mut tasks = JoinSet::new();

    for (index, candidate) in candidates.iter().cloned().enumerate() {
        let source = source.clone();
        let classifier = classifier.clone();
        let metrics = metrics.clone();
        let semaphore = semaphore.clone();
        tasks.spawn(async move {
            let _permit = semaphore.acquire_owned().await.ok();
            let record = classify_one(source.as_ref(), classifier.as_ref(), &candidate, &metrics).await;
            (index, record)
        });
    }
    debug!(candidates = %candidates.len(), concurrency = %concurrency, "classification_fanned_out");

    let mut slots: Vec<Option<ClassifiedAddress>> = vec![None; candidates.len()];
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, record)) => slots[index] = Some(record),
            Err(e) => error!(error = %e, "classification_task_failed"),
        }
    }

    // A task that died still owes its candidate a record
    let records: Vec<ClassifiedAddress> = slots
        .into_iter()
        .zip(candidates)
        .map(|(slot, candidate)| {
            slot.unwrap_or_else(|| {
                metrics.record_missing_response();
                let record = classifier.classify(candidate, None);
                metrics.record_classification(record.geocode_status);
                record
            })
        })
        .collect();

    info!(records = %records.len(), "classification_complete");
    records
}
