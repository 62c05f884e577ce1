//! shopsearch-live
//!
//! The piece a search box talks to: a [`LiveCatalog`] whose index is rebuilt
//! off to the side and swapped in atomically, results pinned to the snapshot
//! they were computed from, last-query-wins tickets, and the display rows and
//! navigation target for a selected result.

pub mod catalog;
pub mod display;
pub mod tracker;

pub use catalog::{CatalogSnapshot, LiveCatalog, LiveResults};
pub use display::{Selection, Suggestion};
pub use tracker::{QueryTicket, QueryTracker};
