//! Process exit codes. Part of the public contract for scripts and CI.

pub const SUCCESS: i32 = 0;
pub const DIFFERENCES_FOUND: i32 = 1; // Only with --fail-on-diff
pub const CONFIG_ERROR: i32 = 2; // Invalid arguments, config, or unreadable store
