// NVH Monitor — Indicator Controller
//
// Drives the buzzer, the alert light and the status screen. Every cycle
// starts from the normal state; each fired alert then overwrites it in
// evaluation order, so when both fire the noise visuals are what remains.

use crate::error::Result;
use crate::evaluator::{Alert, Classification};

pub const HEADER_TEXT: &str = "NVH Monitoring";
pub const NORMAL_TEXT: &str = "Normal";
pub const VIBRATION_TEXT: &str = "Abnrml Vibration";
pub const NOISE_TEXT: &str = "Abnormal Noise";

pub const HEADER_ROW: i32 = 0;
pub const STATUS_ROW: i32 = 16;
pub const NOISE_ROW: i32 = 32;

/// Monochrome character display. Coordinates are in pixels from the top-left.
pub trait StatusDisplay {
    fn clear(&mut self) -> Result<()>;
    fn draw_text(&mut self, row: i32, col: i32, text: &str) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
}

/// The two digital alert outputs.
pub trait AlertOutputs {
    fn set_buzzer(&mut self, on: bool) -> Result<()>;
    fn set_light(&mut self, on: bool) -> Result<()>;
}

pub struct IndicatorController<D, O> {
    display: D,
    outputs: O,
}

impl<D: StatusDisplay, O: AlertOutputs> IndicatorController<D, O> {
    pub fn new(display: D, outputs: O) -> Self {
        Self { display, outputs }
    }

    /// Full per-cycle indicator update: normal state, then every fired alert.
    ///
    /// The monitor loop makes the same writes one at a time so each alert's
    /// notifications go out right after its visuals; the end state matches.
    pub fn apply(&mut self, classification: &Classification) {
        self.show_normal();
        for alert in classification.alerts() {
            self.raise(alert);
        }
    }

    /// Default state written at the start of every cycle.
    pub fn show_normal(&mut self) {
        self.set_outputs(true, false);
        self.show_screen(STATUS_ROW, NORMAL_TEXT);
    }

    pub fn raise(&mut self, alert: Alert) {
        match alert {
            Alert::Vibration => {
                self.show_screen(STATUS_ROW, VIBRATION_TEXT);
                self.set_outputs(false, true);
            }
            Alert::Noise => {
                self.show_screen(NOISE_ROW, NOISE_TEXT);
                self.set_outputs(true, true);
            }
        }
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn outputs(&self) -> &O {
        &self.outputs
    }

    fn show_screen(&mut self, row: i32, text: &str) {
        if let Err(e) = self.draw_screen(row, text) {
            log::warn!("Display update failed: {}", e);
        }
    }

    fn draw_screen(&mut self, row: i32, text: &str) -> Result<()> {
        self.display.clear()?;
        self.display.draw_text(HEADER_ROW, 0, HEADER_TEXT)?;
        self.display.draw_text(row, 0, text)?;
        self.display.flush()
    }

    fn set_outputs(&mut self, buzzer: bool, light: bool) {
        if let Err(e) = self.outputs.set_buzzer(buzzer) {
            log::warn!("Buzzer write failed: {}", e);
        }
        if let Err(e) = self.outputs.set_light(light) {
            log::warn!("Alert light write failed: {}", e);
        }
    }
}
