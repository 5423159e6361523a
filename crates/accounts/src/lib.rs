//! `sportiva-accounts` — persistence collaborator for account records.
//!
//! Worker and customer credentials live behind narrow store traits; the
//! in-memory implementations back tests and development. The auth core only
//! ever talks to the interfaces.

pub mod memory;
pub mod records;
pub mod store;

pub use memory::{InMemoryCustomerStore, InMemoryWorkerStore};
pub use records::{ActiveFlag, CustomerRecord, WorkerRecord, WorkerStatus};
pub use store::{CustomerStore, StoreError, WorkerStore};
