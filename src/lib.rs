//! covwalk - Guided covenant-monitoring workflow walkthrough
//!
//! The core is the navigation model: a canonical step catalog, a
//! dispatcher resolving sidebar selections, a typed event bus carrying
//! cross-application navigation notices, and a single-slot notification
//! queue. The TUI renders that core.

pub mod app;
pub mod bridge;
pub mod bus;
pub mod config;
pub mod logging;
pub mod notifications;
pub mod spool;
pub mod ui;
pub mod workflow;
