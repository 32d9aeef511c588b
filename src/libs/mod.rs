//! Core library modules.
//!
//! The rotation engine (`shift`, `cycle`, `daily_override`, `resolution`,
//! `statistics`, `registry`, `store`) has no terminal or filesystem
//! dependencies; the rest backs the command-line surface.

pub mod alarm;
pub mod calendar;
pub mod color;
pub mod config;
pub mod cycle;
pub mod daily_override;
pub mod data_storage;
pub mod error;
pub mod event;
pub mod export;
pub mod formatter;
pub mod messages;
pub mod registry;
pub mod resolution;
pub mod shift;
pub mod statistics;
pub mod store;
pub mod view;
