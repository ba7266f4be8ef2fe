//! Shared helpers used across TUI features.

pub mod task;
pub mod text;

pub use task::{TaskId, TaskSeq, TaskState};
pub use text::{sanitize_for_display, truncate_with_ellipsis};
