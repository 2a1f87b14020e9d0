//! IO modules - files in and out of a pipeline run
//!
//! - `route_file` - route description loading (bare, wrapped or extraction envelope)
//! - `recorded` - geocode source backed by recorded provider responses
//! - `report` - route report output (pretty JSON)

pub mod recorded;
pub mod report;
pub mod route_file;

// Re-export commonly used types
pub use recorded::RecordedResponses;
pub use report::ReportWriter;
pub use route_file::load_route;
