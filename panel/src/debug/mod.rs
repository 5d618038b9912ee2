//! # Logging and Configuration
//!
//! - **[`config`]**: [`DebugConfig`], read from `PANEL_*` environment variables
//! - **[`logger`]**: file logging with daily rotation, see [`init_logger`]
//!
//! ## Usage
//!
//! ```rust,no_run
//! use panel::debug::{init_logger, DebugConfig};
//!
//! let config = DebugConfig::from_env();
//! let _guard = init_logger(&config).expect("log directory is writable");
//! tracing::info!(listing_id = 4, "Listing book updated");
//! ```
//!
//! ## Configuration
//!
//! Environment variables:
//! - `RUST_LOG`: Log level filter (default `panel=info,warn`)
//! - `PANEL_LOG_DIR`: Directory for the rotated `panel.log` files (default `logs`)
//! - `PANEL_LOG_STDERR`: Mirror logs to stderr (1=on, 0=off)
//! - `PANEL_CONFIRMATION_OVERDUE_SECS`: Seconds before a pending confirmation is logged as overdue (default 120)
//! - `PANEL_SIM_CONFIRM_MS`: Simulated chain auto-confirm delay (default 750)

pub mod config;
pub mod logger;

pub use config::DebugConfig;
pub use logger::init as init_logger;
