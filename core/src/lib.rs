//! NVH Monitor — hardware-independent core.
//!
//! One monitoring cycle reads a [`SensorSample`], evaluates it against the
//! fixed [`Thresholds`], drives the local indicators and reports to the
//! telemetry and messaging endpoints:
//!
//! ```text
//! SensorReader ──▶ evaluate ──┬──▶ IndicatorController (buzzer, light, OLED)
//!                             ├──▶ TelemetryReporter   (time-series GET)
//!                             └──▶ AlertNotifier       (bot message GET)
//! ```
//!
//! Peripherals and the network are reached only through the traits in
//! [`sample`], [`indicator`], [`report`] and [`link`], so the firmware can
//! plug in ESP-IDF drivers while the cycle itself runs anywhere.

pub mod config;
pub mod error;
pub mod evaluator;
pub mod indicator;
pub mod link;
pub mod monitor;
pub mod report;
pub mod sample;

pub use config::{RemoteEndpoints, Thresholds};
pub use error::{Error, Result};
pub use evaluator::{evaluate, Alert, Classification, Evaluation};
pub use indicator::{AlertOutputs, IndicatorController, StatusDisplay};
pub use link::{wait_for_association, WirelessLink};
pub use monitor::{Delay, Monitor};
pub use report::{AlertNotifier, HttpGet, HttpStatus, TelemetryReporter};
pub use sample::{SensorReader, SensorSample};
