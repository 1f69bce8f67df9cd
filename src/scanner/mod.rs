pub mod file_selector;
pub mod path_filter;

pub use file_selector::{sort_by_mod_time, FileSelector, SelectionStatistics};
pub use path_filter::PathFilter;
