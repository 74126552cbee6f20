//! Backend client adapter for PocketBase.
//!
//! Tool handlers never talk to the network directly; they go through the
//! [`PocketBase`] trait, which covers the three backend surfaces the server
//! needs: collection administration, record CRUD/listing, and the
//! authentication flows. The trait owns the only piece of session state in
//! the system (the authenticated token, held by [`HttpPocketBase`]).
//!
//! # Key Types
//!
//! - [`PocketBase`] - The adapter trait handlers are generic over
//! - [`HttpPocketBase`] - reqwest client for a live PocketBase instance
//! - [`InMemoryPocketBase`] - In-memory client for tests and local development
//! - [`ClientError`] - Failure type shared by all implementations

pub mod adapter;
pub mod error;
pub mod http;
pub mod in_memory;

pub use adapter::PocketBase;
pub use error::ClientError;
pub use http::HttpPocketBase;
pub use in_memory::InMemoryPocketBase;
