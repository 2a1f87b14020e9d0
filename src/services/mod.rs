//! Services - the route preparation stages
//!
//! - `candidates` - expands house-number ranges into address candidates
//! - `classifier` - maps provider responses to confidence tiers
//! - `dispatch` - concurrent classification with a batch barrier
//! - `proximity` - haversine distance and per-zone outlier filtering
//! - `aggregator` - regroups survivors by zone and street, tallies the batch
//! - `range_analysis` - flags house-number spans that look misread
//! - `pipeline` - runs the stages end to end

pub mod aggregator;
pub mod candidates;
pub mod classifier;
pub mod dispatch;
pub mod pipeline;
pub mod proximity;
pub mod range_analysis;

// Re-export commonly used types
pub use aggregator::aggregate;
pub use candidates::{generate, GeneratorOptions};
pub use classifier::{classify, AddressClassifier, PrecisionClassifier};
pub use dispatch::{classify_all, GeocodeSource};
pub use pipeline::Pipeline;
pub use proximity::{haversine_m, ClusterOptions};
pub use range_analysis::analyze_ranges;
