// Flow layout: block building, measurement against static font metrics, pagination.
// Layout is CPU-bound; handlers must call it inside tokio::task::spawn_blocking.

pub mod blocks;
pub mod document;
pub mod font_metrics;
pub mod page_spec;
pub mod paginator;
pub mod wrap;

// Re-export the public API consumed by the export pipeline, handlers and config.
pub use blocks::build_blocks;
pub use document::Document;
pub use page_spec::{PageFormat, PageSpec};
pub use paginator::paginate;
