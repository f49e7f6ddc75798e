//! Synchronous record → profile → blocks → document pipeline.
//!
//! Pure and reentrant. Handlers run it inside `spawn_blocking`.

use tracing::info;

use crate::layout::{build_blocks, paginate, Document, PageSpec};
use crate::profile::{resolve, EnhancementRecord, MissingDataPolicy, ResolvedProfile};

#[derive(Debug, Clone, PartialEq)]
pub struct ExportOutcome {
    pub profile: ResolvedProfile,
    pub document: Document,
}

/// Resolves `record` and lays it out on pages of `spec`.
///
/// `spec` must already be validated; malformed record data never fails.
pub fn export_document(
    record: &EnhancementRecord,
    policy: MissingDataPolicy,
    spec: &PageSpec,
) -> ExportOutcome {
    let profile = resolve(record, policy);
    let blocks = build_blocks(&profile);
    let document = paginate(&blocks, spec);

    info!(
        blocks = blocks.len(),
        pages = document.page_count(),
        placeholder = profile.sources.uses_placeholder(),
        filename = %document.suggested_filename,
        "Export layout complete"
    );

    ExportOutcome { profile, document }
}
