//! Domain logic for chart submission: categories, entry completeness,
//! ranked-list reordering, and the draft/submitted promotion rules.
//!
//! Nothing in this crate performs I/O. Repositories in `chartdesk-db` read
//! rows, ask these modules for a plan, and apply the plan in a transaction.

pub mod catalog;
pub mod category;
pub mod chart;
pub mod commands;
pub mod completeness;
pub mod error;
pub mod promotion;
pub mod purge;
pub mod reorder;
pub mod roles;
pub mod types;
