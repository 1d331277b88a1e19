//! Command implementations for the xwd CLI.

pub mod check;
pub mod edit;
pub mod grid;
pub mod info;
pub mod repair;
pub mod words;

pub use check::cmd_check;
pub use edit::{EditAction, cmd_edit};
pub use grid::cmd_grid;
pub use info::cmd_info;
pub use repair::cmd_repair;
pub use test::cmd_test;
pub use words::cmd_words;
