//! # Rota - shift rotation calendar
//!
//! Repeating shift cycles with per-day overrides, a month calendar,
//! shift-aware alarms and work-hour statistics.
//!
//! ```rust,no_run
//! use rota::commands::Cli;
//!
//! fn main() -> anyhow::Result<()> {
//!     Cli::menu()
//! }
//! ```

pub mod commands;
pub mod db;
pub mod libs;
