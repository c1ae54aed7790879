// NVH Monitor — Sensor Sample
//
// One 6-axis IMU reading plus one sound level, produced fresh every cycle.

use crate::error::Result;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SensorSample {
    /// Linear acceleration in g.
    pub ax: f32,
    pub ay: f32,
    pub az: f32,
    /// Angular rate in °/s.
    pub gx: f32,
    pub gy: f32,
    pub gz: f32,
    /// Microphone level on the 16-bit ADC scale.
    pub sound: u16,
}

impl SensorSample {
    pub fn accel(&self) -> [f32; 3] {
        [self.ax, self.ay, self.az]
    }

    pub fn gyro(&self) -> [f32; 3] {
        [self.gx, self.gy, self.gz]
    }
}

/// Source of one [`SensorSample`] per cycle. Blocks on the peripheral bus and
/// never retries; an unreachable peripheral is reported as
/// [`Error::PeripheralUnavailable`](crate::Error::PeripheralUnavailable).
pub trait SensorReader {
    fn read(&mut self) -> Result<SensorSample>;
}

/// Widen a 12-bit ADC conversion to the full 16-bit range, replicating the
/// top bits into the low nibble so 0 and 4095 map to 0 and 65535.
pub fn widen_adc12(raw: u16) -> u16 {
    let raw = raw.min(0x0FFF);
    (raw << 4) | (raw >> 8)
}
