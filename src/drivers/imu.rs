// NVH Monitor — Inertial Sensor (MPU6050)
//
// Register access goes straight through the shared I2C driver. The sensor is
// set up once at boot for machine-vibration ranges and then sampled with one
// burst read per cycle.

use crate::config::*;
use crate::drivers::{lock, SharedBus};

const IDENTITY: u8 = 0x75;
const IDENTITY_VALUE: u8 = 0x68;
const SAMPLE_FRAME_START: u8 = 0x3B;

/// accel xyz, die temperature, gyro xyz; big-endian i16 each
const SAMPLE_FRAME_LEN: usize = 14;
const GYRO_OFFSET: usize = 8;

/// (register, value) writes applied in order at boot.
const SETUP: [(u8, u8); 4] = [
    (0x6B, 0x00), // power management: leave sleep, internal clock
    (0x1A, 0x04), // low-pass filter ~21 Hz
    (0x1B, 0x08), // gyro full scale ±500 °/s
    (0x1C, 0x10), // accel full scale ±8 g
];

/// One burst read in physical units: g and °/s.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImuReading {
    pub accel: [f32; 3],
    pub gyro: [f32; 3],
}

pub struct Mpu6050 {
    bus: SharedBus,
}

impl Mpu6050 {
    pub fn new(bus: SharedBus) -> Self {
        Self { bus }
    }

    /// True when the identity register answers with the expected value.
    pub fn is_connected(&self) -> bool {
        let mut id = [0u8; 1];
        lock(self.bus)
            .ok()
            .and_then(|mut bus| {
                bus.write_read(I2C_ADDR_MPU6050, &[IDENTITY], &mut id, I2C_TIMEOUT_TICKS)
                    .ok()
            })
            .is_some_and(|()| id[0] == IDENTITY_VALUE)
    }

    pub fn init(&self) -> anyhow::Result<()> {
        let mut bus = lock(self.bus)?;
        for (register, value) in SETUP {
            bus.write(I2C_ADDR_MPU6050, &[register, value], I2C_TIMEOUT_TICKS)?;
        }
        log::info!("IMU ready: accel ±8 g, gyro ±500 °/s");
        Ok(())
    }

    pub fn read_data(&self) -> anyhow::Result<ImuReading> {
        let mut frame = [0u8; SAMPLE_FRAME_LEN];
        lock(self.bus)?.write_read(
            I2C_ADDR_MPU6050,
            &[SAMPLE_FRAME_START],
            &mut frame,
            I2C_TIMEOUT_TICKS,
        )?;
        Ok(decode_frame(&frame))
    }
}

fn decode_frame(frame: &[u8; SAMPLE_FRAME_LEN]) -> ImuReading {
    let triple = |start: usize, per_unit: f32| -> [f32; 3] {
        std::array::from_fn(|k| {
            let at = start + 2 * k;
            f32::from(i16::from_be_bytes([frame[at], frame[at + 1]])) / per_unit
        })
    };
    ImuReading {
        accel: triple(0, ACCEL_SCALE_8G),
        gyro: triple(GYRO_OFFSET, GYRO_SCALE_500),
    }
}
