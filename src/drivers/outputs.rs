// NVH Monitor — Buzzer & Alert Light
//
// Two plain active-high GPIO outputs.

use esp_idf_hal::gpio::{AnyOutputPin, Output, PinDriver};
use nvh_core::{AlertOutputs, Error};

pub struct AlertPins<'d> {
    buzzer: PinDriver<'d, AnyOutputPin, Output>,
    light: PinDriver<'d, AnyOutputPin, Output>,
}

impl<'d> AlertPins<'d> {
    pub fn new(
        buzzer: PinDriver<'d, AnyOutputPin, Output>,
        light: PinDriver<'d, AnyOutputPin, Output>,
    ) -> Self {
        Self { buzzer, light }
    }
}

fn drive(pin: &mut PinDriver<'_, AnyOutputPin, Output>, on: bool) -> nvh_core::Result<()> {
    let result = if on { pin.set_high() } else { pin.set_low() };
    result.map_err(|e| Error::PeripheralUnavailable(format!("GPIO{}: {}", pin.pin(), e)))
}

impl AlertOutputs for AlertPins<'_> {
    fn set_buzzer(&mut self, on: bool) -> nvh_core::Result<()> {
        drive(&mut self.buzzer, on)
    }

    fn set_light(&mut self, on: bool) -> nvh_core::Result<()> {
        drive(&mut self.light, on)
    }
}
