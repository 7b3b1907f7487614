//! Document store abstraction layer
//!
//! The gateway talks to its backend exclusively through [`DocumentStore`].

pub mod factory;
pub mod traits;

pub use factory::create_document_store;
pub use traits::DocumentStore;
