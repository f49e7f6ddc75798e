// Content resolution: untrusted enhancement records in, canonical profiles out.
// Nothing in this module fails; malformed fields default independently.

pub mod concepts;
pub mod models;
pub mod placeholder;
pub mod record;
pub mod resolver;
pub mod sanitize;
pub mod structured;

pub use models::{ProfileSources, ResolvedProfile};
pub use placeholder::MissingDataPolicy;
pub use record::EnhancementRecord;
pub use resolver::resolve;
