// NVH Monitor — Sensor Reader
//
// Combines the IMU burst read and the microphone ADC into one sample.

use nvh_core::sample::widen_adc12;
use nvh_core::{Error, SensorReader, SensorSample};

use crate::drivers::imu::Mpu6050;
use crate::drivers::sound::SoundSensor;

pub struct NodeSensors {
    imu: Mpu6050,
    sound: SoundSensor,
}

impl NodeSensors {
    pub fn new(imu: Mpu6050, sound: SoundSensor) -> Self {
        Self { imu, sound }
    }
}

impl SensorReader for NodeSensors {
    fn read(&mut self) -> nvh_core::Result<SensorSample> {
        let imu = self
            .imu
            .read_data()
            .map_err(|e| Error::PeripheralUnavailable(format!("MPU6050: {e}")))?;
        let raw = self
            .sound
            .read_raw()
            .map_err(|e| Error::PeripheralUnavailable(format!("sound ADC: {e}")))?;

        let [ax, ay, az] = imu.accel;
        let [gx, gy, gz] = imu.gyro;
        Ok(SensorSample {
            ax,
            ay,
            az,
            gx,
            gy,
            gz,
            sound: widen_adc12(raw),
        })
    }
}
