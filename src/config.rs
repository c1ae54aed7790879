// NVH Monitor — Hardware & System Configuration
// Target: Seeed Studio Xiao ESP32-C3 (RISC-V)
//
// Alert thresholds, cycle timing and endpoint defaults live in
// `nvh_core::config`; this file only covers the board.

// ---------------------------------------------------------------------------
// GPIO Pin Definitions (Xiao ESP32-C3 pinout)
// ---------------------------------------------------------------------------
pub const PIN_SOUND_ADC: u32 = 2; // D0/A0 — Microphone module analog out
pub const PIN_BUZZER: i32 = 4;    // D2    — Buzzer (active HIGH)
pub const PIN_ALERT_LED: i32 = 5; // D3    — Alert light (active HIGH)
pub const PIN_I2C_SDA: i32 = 6;   // D4    — I2C data line
pub const PIN_I2C_SCL: i32 = 7;   // D5    — I2C clock line

// ---------------------------------------------------------------------------
// I2C Bus (shared between IMU and OLED)
// ---------------------------------------------------------------------------
pub const I2C_ADDR_MPU6050: u8 = 0x68;
pub const I2C_ADDR_OLED: u8 = 0x3C;
pub const I2C_TIMEOUT_TICKS: u32 = 1000; // FreeRTOS ticks
pub const I2C_BAUDRATE_KHZ: u32 = 400;

// ---------------------------------------------------------------------------
// Display (SH1106 OLED)
// ---------------------------------------------------------------------------
pub const SCREEN_WIDTH: u32 = 128;
pub const SCREEN_HEIGHT: u32 = 64;
pub const DISPLAY_BUFFER_SIZE: usize = (SCREEN_WIDTH as usize * SCREEN_HEIGHT as usize) / 8; // 1024
pub const SH1106_COLUMN_OFFSET: u8 = 2; // 132-column controller, 128 visible

// ---------------------------------------------------------------------------
// Task Stack Sizes (bytes)
// ---------------------------------------------------------------------------
pub const STACK_MONITOR: usize = 16384; // TLS handshakes need the headroom

// ---------------------------------------------------------------------------
// Wi-Fi association
// ---------------------------------------------------------------------------
/// `None` blocks until the access point is reachable.
pub const WIFI_MAX_POLLS: Option<u32> = None;

// ---------------------------------------------------------------------------
// Credentials (baked in at build time)
// ---------------------------------------------------------------------------
pub const WIFI_SSID: &str = match option_env!("NVH_WIFI_SSID") {
    Some(v) => v,
    None => "YOUR_WIFI_SSID",
};
pub const WIFI_PASSWORD: &str = match option_env!("NVH_WIFI_PASSWORD") {
    Some(v) => v,
    None => "YOUR_WIFI_PASSWORD",
};
pub const TELEMETRY_API_KEY: &str = match option_env!("NVH_TELEMETRY_API_KEY") {
    Some(v) => v,
    None => "YOUR_THINGSPEAK_API_KEY",
};
pub const BOT_TOKEN: &str = match option_env!("NVH_BOT_TOKEN") {
    Some(v) => v,
    None => "YOUR_TELEGRAM_BOT_TOKEN",
};
pub const CHAT_ID: &str = match option_env!("NVH_CHAT_ID") {
    Some(v) => v,
    None => "YOUR_CHAT_ID",
};

// ---------------------------------------------------------------------------
// MPU6050 Sensor Scale Factors
// ---------------------------------------------------------------------------
pub const ACCEL_SCALE_8G: f32 = 4096.0;   // LSB/g  at ±8 g
pub const GYRO_SCALE_500: f32 = 65.5;     // LSB/°/s at ±500 °/s
