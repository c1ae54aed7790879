// NVH Monitor — Firmware Entry Point
//
// Boot sequence:
//   1. Associate with the Wi-Fi access point (blocks until connected).
//   2. Bring up the shared I2C bus, then the OLED and the MPU6050.
//   3. Run a component self-test (results logged, never fatal).
//   4. Spawn the monitor thread: sample, classify, indicate, report, sleep
//      one second, forever. The thread owns the Wi-Fi link and re-issues the
//      connect request whenever it finds the station down.

mod config;
mod drivers;
mod net;
mod sensors;

use std::sync::atomic::AtomicBool;
use std::sync::Mutex;
use std::thread;
use std::time::Duration;

use anyhow::anyhow;
use esp_idf_hal::gpio::{OutputPin, PinDriver};
use esp_idf_hal::i2c::{I2cConfig, I2cDriver};
use esp_idf_hal::prelude::*;
use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::nvs::EspDefaultNvsPartition;
use nvh_core::config::{ASSOCIATION_POLL_INTERVAL, HTTP_TIMEOUT};
use nvh_core::{
    wait_for_association, AlertNotifier, Delay, IndicatorController, Monitor, RemoteEndpoints,
    TelemetryReporter,
};

use crate::config::*;
use crate::drivers::display::OledDisplay;
use crate::drivers::imu::Mpu6050;
use crate::drivers::outputs::AlertPins;
use crate::drivers::sound::SoundSensor;
use crate::drivers::SharedBus;
use crate::net::http::EspHttpGet;
use crate::net::wifi::WifiLink;
use crate::sensors::NodeSensors;

/// Shutdown hook, checked by the monitor between cycles.
static STOP_REQUESTED: AtomicBool = AtomicBool::new(false);

/// FreeRTOS-backed blocking sleep.
struct ThreadDelay;

impl Delay for ThreadDelay {
    fn sleep(&mut self, duration: Duration) {
        thread::sleep(duration);
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------
fn main() -> anyhow::Result<()> {
    // Link esp-idf-sys runtime patches and initialise logging.
    esp_idf_svc::sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();
    log::info!("NVH monitor firmware starting…");

    // ---- Peripherals ------------------------------------------------------
    let peripherals = Peripherals::take()?;
    let sysloop = EspSystemEventLoop::take()?;
    let nvs = EspDefaultNvsPartition::take()?;

    // ---- Wi-Fi (station) --------------------------------------------------
    let mut wifi = WifiLink::new(peripherals.modem, sysloop, Some(nvs))?;
    wifi.connect(WIFI_SSID, WIFI_PASSWORD)?;
    wait_for_association(&mut wifi, &mut ThreadDelay, ASSOCIATION_POLL_INTERVAL, WIFI_MAX_POLLS)?;
    wifi.log_ip_info();

    // ---- I2C bus (shared between OLED and MPU6050) ------------------------
    let i2c_config = I2cConfig::new().baudrate(I2C_BAUDRATE_KHZ.kHz().into());
    let i2c = I2cDriver::new(
        peripherals.i2c0,
        peripherals.pins.gpio6, // SDA
        peripherals.pins.gpio7, // SCL
        &i2c_config,
    )?;
    log::info!("I2C bus up (SDA GPIO{}, SCL GPIO{})", PIN_I2C_SDA, PIN_I2C_SCL);
    // The bus lives for the whole programme; firmware never exits.
    let i2c_bus: SharedBus = Box::leak(Box::new(Mutex::new(i2c)));

    // ---- Display + IMU ----------------------------------------------------
    let mut display = OledDisplay::new(i2c_bus);
    if let Err(e) = display.init() {
        log::error!("OLED init failed: {}", e);
    }

    let imu = Mpu6050::new(i2c_bus);
    if let Err(e) = imu.init() {
        log::error!("MPU6050 init failed: {}", e);
    }

    // ---- Self-test --------------------------------------------------------
    let oled_ok = display.is_connected();
    let imu_ok = imu.is_connected();
    if !oled_ok || !imu_ok {
        log::error!("Boot check FAILED — OLED:{} IMU:{}", oled_ok, imu_ok);
        // Continue anyway: failed reads skip their cycle and get logged.
    }

    // ---- Alert outputs ----------------------------------------------------
    let buzzer = PinDriver::output(peripherals.pins.gpio4.downgrade_output())?;
    let light = PinDriver::output(peripherals.pins.gpio5.downgrade_output())?;
    log::info!("Buzzer on GPIO{}, alert light on GPIO{}", PIN_BUZZER, PIN_ALERT_LED);

    let endpoints = RemoteEndpoints::new(TELEMETRY_API_KEY, BOT_TOKEN, CHAT_ID);

    // ---- Monitor task -----------------------------------------------------
    let monitor = thread::Builder::new()
        .name("monitor".into())
        .stack_size(STACK_MONITOR)
        .spawn(move || -> anyhow::Result<()> {
            let sensors = NodeSensors::new(imu, SoundSensor::new()?);
            let indicators = IndicatorController::new(display, AlertPins::new(buzzer, light));

            let mut monitor = Monitor::new(
                sensors,
                indicators,
                TelemetryReporter::new(EspHttpGet::new(HTTP_TIMEOUT), &endpoints),
                AlertNotifier::new(EspHttpGet::new(HTTP_TIMEOUT), &endpoints),
                ThreadDelay,
            );
            monitor.run(&mut wifi, &STOP_REQUESTED);
            Ok(())
        })?;

    monitor
        .join()
        .map_err(|_| anyhow!("monitor thread panicked"))?
}
