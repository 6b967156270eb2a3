//! Keeps a local todo list in step with a remote REST collection.
//!
//! # Overview
//! `TodoClient` builds `HttpRequest` values and parses `HttpResponse` values
//! without touching the network. A `Transport` performs the round-trip.
//! `TodoSynchronizer` ties both to a `TodoStore`: each operation makes one
//! remote call and, only if it succeeds, reconciles the store to match.
//!
//! # Design
//! - `TodoClient` is stateless; it holds only `base_url`.
//! - The store has exactly one writer, a worker task fed through an intent
//!   queue. Handles are cloneable and views subscribe to snapshots.
//! - Failures never mutate state and are returned as `SyncError`.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod error;
pub mod http;
pub mod store;
pub mod sync;
pub mod transport;
pub mod types;

pub use client::TodoClient;
pub use error::{ApiError, SyncError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use store::TodoStore;
pub use sync::{SyncConfig, TodoSynchronizer, DEFAULT_BASE_URL};
pub use transport::{Transport, UreqTransport};
pub use types::{CreateTodo, Todo, TodoId, UpdateTodo};
