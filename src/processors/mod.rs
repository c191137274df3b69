pub mod aggregator;
pub mod launch_filter;

pub use aggregator::{median, summarize, Aggregator};
pub use launch_filter::{FilterReport, LaunchFilter, RejectionReason};
