// NVH Monitor — Microphone Level (ADC)
//
// One-shot ADC1 conversions via raw ESP-IDF calls, 11 dB attenuation
// (0–3.3 V range), 12-bit.

use esp_idf_sys::{self as sys, esp};

use crate::config::PIN_SOUND_ADC;

pub struct SoundSensor {
    handle: sys::adc_oneshot_unit_handle_t,
    channel: sys::adc_channel_t,
}

impl SoundSensor {
    pub fn new() -> anyhow::Result<Self> {
        // GPIOn is ADC1 channel n on the C3 for n in 0..=4.
        let channel = PIN_SOUND_ADC as sys::adc_channel_t;
        let mut handle: sys::adc_oneshot_unit_handle_t = core::ptr::null_mut();

        unsafe {
            let unit_cfg = sys::adc_oneshot_unit_init_cfg_t {
                unit_id: sys::adc_unit_t_ADC_UNIT_1,
                ulp_mode: sys::adc_ulp_mode_t_ADC_ULP_MODE_DISABLE,
                ..core::mem::zeroed()
            };
            esp!(sys::adc_oneshot_new_unit(&unit_cfg, &mut handle))?;

            let chan_cfg = sys::adc_oneshot_chan_cfg_t {
                atten: sys::adc_atten_t_ADC_ATTEN_DB_11,
                bitwidth: sys::adc_bitwidth_t_ADC_BITWIDTH_12,
            };
            if let Err(e) = esp!(sys::adc_oneshot_config_channel(handle, channel, &chan_cfg)) {
                sys::adc_oneshot_del_unit(handle);
                return Err(e.into());
            }
        }

        log::info!("Sound ADC ready on GPIO{}", PIN_SOUND_ADC);
        Ok(Self { handle, channel })
    }

    /// Raw 12-bit conversion (0–4095).
    pub fn read_raw(&self) -> anyhow::Result<u16> {
        let mut raw: i32 = 0;
        esp!(unsafe { sys::adc_oneshot_read(self.handle, self.channel, &mut raw) })?;
        Ok(raw.clamp(0, 0x0FFF) as u16)
    }
}

impl Drop for SoundSensor {
    fn drop(&mut self) {
        unsafe {
            sys::adc_oneshot_del_unit(self.handle);
        }
    }
}
