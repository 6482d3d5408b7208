//! Gantry Client - GraphQL mutation client for a remote collector.
//!
//! [`RemoteMutations`] implements the
//! [`ProjectMutations`](gantry_actions::ProjectMutations) trait over HTTP,
//! so an [`ActionCoordinator`](gantry_actions::ActionCoordinator) wired
//! with it dispatches real delete and clear mutations. The remove-data
//! flow calls [`RemoteMutations::remove_project_data`] directly with the
//! cutoff collected from its sub-form.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use gantry_actions::ProjectMutations;
//! use gantry_client::RemoteMutations;
//!
//! # fn main() -> Result<(), gantry_client::ClientError> {
//! let client = RemoteMutations::new("http://localhost:6006/graphql", Duration::from_secs(30))?;
//! let mutations: Arc<dyn ProjectMutations> = Arc::new(client);
//! # let _ = mutations;
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod error;
mod remote;

pub use error::{ClientError, ClientResult};
pub use remote::RemoteMutations;
