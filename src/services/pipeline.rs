//! End-to-end run: generate → classify (fan-out/fan-in) → aggregate

use crate::domain::{RouteReport, RouteSpec};
use crate::infra::{Config, Metrics};
use crate::services::aggregator::aggregate;
use crate::services::candidates::{generate, GeneratorOptions};
use crate::services::classifier::PrecisionClassifier;
use crate::services::dispatch::{classify_all, GeocodeSource};
use crate::services::proximity::ClusterOptions;
use std::sync::Arc;
use tracing::info;

pub struct Pipeline {
    generator: GeneratorOptions,
    cluster: ClusterOptions,
    concurrency: usize,
    metrics: Arc<Metrics>,
}

impl Pipeline {
    pub fn new(config: &Config, metrics: Arc<Metrics>) -> Self {
        Self {
            generator: GeneratorOptions::from_config(config),
            cluster: ClusterOptions::from_config(config),
            concurrency: config.concurrency(),
            metrics,
        }
    }

    pub fn metrics(&self) -> &Arc<Metrics> {
        &self.metrics
    }

    pub async fn run<S>(&self, route: &RouteSpec, source: Arc<S>) -> RouteReport
    where
        S: GeocodeSource + ?Sized + 'static,
    {
        let candidates = generate(route, &self.generator);
        let records = classify_all(
            source,
            Arc::new(PrecisionClassifier),
            &candidates,
            self.concurrency,
            self.metrics.clone(),
        )
        .await;

        let aggregation = aggregate(&records, &self.cluster);
        let report = RouteReport::new(aggregation, records);
        info!(
            run_id = %report.run_id,
            needs_review = %report.summary.needs_review(),
            "pipeline_complete"
        );
        report
    }
}
