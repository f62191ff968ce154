//! Derived statistics over fetched lab records.
//!
//! Everything here is a pure function of the records passed in: aggregates
//! are recomputed from scratch on every call and nothing is cached.

pub mod aggregation;
pub mod pagination;

pub use aggregation::{
    count_by, format_percentage, percentage, DashboardSnapshot, Distribution,
};
pub use pagination::{pagination_items, ItemKind, PaginationItem, PaginationOptions, PaginationState};
