//! Background Tasks Module
//!
//! # Tasks
//! - Cleanup: purges expired cache entries and elapsed rate windows

mod cleanup;

pub use cleanup::spawn_cleanup_task;
