// NVH Monitor — Vibration Evaluator
//
// Composite magnitude plus per-cause threshold checks. Pure function of the
// sample and thresholds: no history, no hysteresis.

use crate::config::Thresholds;
use crate::sample::SensorSample;

/// A single alert cause, listed in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alert {
    Vibration,
    Noise,
}

impl Alert {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Vibration => "vibration",
            Self::Noise => "noise",
        }
    }
}

/// Per-cycle outcome. Both causes may fire in the same cycle; `Normal` means
/// neither did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Classification {
    pub vibration: bool,
    pub noise: bool,
}

impl Classification {
    pub const NORMAL: Self = Self {
        vibration: false,
        noise: false,
    };

    pub fn is_normal(&self) -> bool {
        !self.vibration && !self.noise
    }

    pub fn contains(&self, alert: Alert) -> bool {
        match alert {
            Alert::Vibration => self.vibration,
            Alert::Noise => self.noise,
        }
    }

    /// Fired alerts, vibration before noise.
    pub fn alerts(&self) -> impl Iterator<Item = Alert> {
        let fired = *self;
        [Alert::Vibration, Alert::Noise]
            .into_iter()
            .filter(move |alert| fired.contains(*alert))
    }

    /// Status field sent alongside telemetry: 0 when normal, 1 otherwise.
    pub fn status_flag(&self) -> u8 {
        u8::from(!self.is_normal())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    /// Unrounded root-sum-of-squares of the six axes.
    pub magnitude: f32,
    pub classification: Classification,
}

impl Evaluation {
    /// Magnitude rounded to two decimals, for reporting only.
    pub fn reported_magnitude(&self) -> f32 {
        round2(self.magnitude)
    }
}

/// Root-sum-of-squares of the three acceleration and three angular-rate axes.
pub fn magnitude(sample: &SensorSample) -> f32 {
    sample
        .accel()
        .iter()
        .chain(sample.gyro().iter())
        .map(|v| v * v)
        .sum::<f32>()
        .sqrt()
}

pub fn classify(sample: &SensorSample, thresholds: &Thresholds) -> Classification {
    let vibration = sample.accel().iter().any(|a| a.abs() > thresholds.accel)
        || sample.gyro().iter().any(|g| g.abs() > thresholds.gyro);

    Classification {
        vibration,
        noise: sample.sound > thresholds.sound,
    }
}

pub fn evaluate(sample: &SensorSample, thresholds: &Thresholds) -> Evaluation {
    Evaluation {
        magnitude: magnitude(sample),
        classification: classify(sample, thresholds),
    }
}

pub fn round2(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}
