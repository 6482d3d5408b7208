//! Gantry Core - shared types for the project maintenance workspace.
//!
//! This crate holds the small set of types every other Gantry crate builds
//! on:
//!
//! - **Project identity**: [`ProjectId`] and [`ProjectRef`], the opaque
//!   remote identifier and the (id, name) pair the action layer operates on.
//! - **Deferred updates**: [`DeferredQueue`], the staging channel for state
//!   changes that may lag behind urgent ones. Gate transitions are applied
//!   synchronously; mutation settlements and search-filter commits go
//!   through a queue and take effect when the owning loop drains it.
//!
//! # Example
//!
//! ```
//! use gantry_core::{DeferredQueue, ProjectRef};
//!
//! let project = ProjectRef::new("UHJvamVjdDox", "default");
//! assert!(project.is_default());
//!
//! let staged: DeferredQueue<u32> = DeferredQueue::new();
//! staged.push(1);
//! staged.push(2);
//! assert_eq!(staged.drain(), vec![1, 2]);
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod deferred;
pub mod project;

pub use deferred::DeferredQueue;
pub use project::{DEFAULT_PROJECT_NAME, ProjectId, ProjectRef};
