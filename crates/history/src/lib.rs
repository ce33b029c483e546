pub mod client;
pub mod filters;

pub use client::HistoryClient;
pub use filters::{initial_filters, HistoryFilterInput};
