// Export API: request-scoped pipeline from enhancement record to paginated document.

pub mod handlers;
pub mod pipeline;
