//! Gantry Search - deferred search-filter state for a project's views.
//!
//! A project page owns one [`SearchProvider`] holding the current search
//! filter (a substring of trace input/output, or a session id). Descendant
//! views hold [`SearchFilter`] handles: reads see the committed value, and
//! writes are staged rather than applied, so typing into a search box never
//! blocks urgent updates. The owner applies staged writes with
//! [`SearchProvider::commit_pending`] when its loop is idle.
//!
//! A view constructed without a provider in scope is a wiring bug, not a
//! runtime condition: [`SearchFilter::require`] fails fast with
//! [`SearchFilterError::MissingProvider`] so the mistake surfaces during
//! development.
//!
//! # Example
//!
//! ```
//! use gantry_search::SearchProvider;
//!
//! let provider = SearchProvider::new();
//! let filter = provider.handle();
//!
//! filter.set("checkout flow")?;
//! // Staged, not yet visible.
//! assert_eq!(filter.get()?, "");
//!
//! provider.commit_pending();
//! assert_eq!(filter.get()?, "checkout flow");
//! # Ok::<(), gantry_search::SearchFilterError>(())
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

/// Error types and results for search-filter access.
pub mod error;
pub mod filter;

pub use error::{SearchFilterError, SearchFilterResult};
pub use filter::{SearchFilter, SearchProvider};
