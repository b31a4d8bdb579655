//! Command handlers
//!
//! Each command handler orchestrates the execution of a CLI command.

pub mod gallery;
pub mod info;
pub mod plot;

pub use gallery::run_gallery;
pub use info::run_info;
pub use plot::run_plot;
