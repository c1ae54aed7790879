pub mod display;
pub mod imu;
pub mod outputs;
pub mod sound;

use std::sync::{Mutex, MutexGuard};

use esp_idf_hal::i2c::I2cDriver;

/// Thread-safe handle to the I2C bus shared by the IMU and the OLED.
pub type SharedBus = &'static Mutex<I2cDriver<'static>>;

pub(crate) fn lock(bus: SharedBus) -> anyhow::Result<MutexGuard<'static, I2cDriver<'static>>> {
    bus.lock().map_err(|_| anyhow::anyhow!("I2C bus mutex poisoned"))
}
