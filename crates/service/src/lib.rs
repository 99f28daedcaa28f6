//! Service layer providing the marketplace business logic on top of models.
//! - `job_service` is the job transition engine: it validates a status
//!   change and applies the implied provider-counter and ledger mutations.
//! - `earnings_service` is the read-only aggregation side (summaries,
//!   monthly breakdown, dashboard snapshot).
//! - The remaining modules are provider/offering/transaction CRUD and the
//!   auth service used by the portals.

pub mod errors;
pub mod pagination;
pub mod auth;
pub mod provider_service;
pub mod user_service;
pub mod job_service;
pub mod earnings_service;
pub mod transaction_service;
pub mod offering_service;
#[cfg(test)]
pub mod test_support;
