// NVH Monitor — Thresholds, Endpoints & Timing

use std::time::Duration;

// ---------------------------------------------------------------------------
// Alert thresholds
// ---------------------------------------------------------------------------
pub const ACCEL_THRESHOLD: f32 = 1.4; // g, per axis
pub const GYRO_THRESHOLD: f32 = 100.0; // °/s, per axis
pub const SOUND_THRESHOLD: u16 = 4500; // 16-bit ADC units

// ---------------------------------------------------------------------------
// Timing
// ---------------------------------------------------------------------------
pub const CYCLE_INTERVAL: Duration = Duration::from_secs(1);
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(5);
pub const ASSOCIATION_POLL_INTERVAL: Duration = Duration::from_secs(1);
pub const REASSOCIATE_EVERY_POLLS: u32 = 5; // re-issue connect while down

// ---------------------------------------------------------------------------
// Remote services
// ---------------------------------------------------------------------------
pub const DEFAULT_TELEMETRY_URL: &str = "https://api.thingspeak.com/update";
pub const DEFAULT_BOT_BASE_URL: &str = "https://api.telegram.org";

pub const VIBRATION_MESSAGE: &str = "🚨 Abnormal vibration detected!";
pub const NOISE_MESSAGE: &str = "🚨 Abnormal Noise detected!";

/// Fixed alert limits. Immutable for the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub accel: f32,
    pub gyro: f32,
    pub sound: u16,
}

impl Thresholds {
    pub const DEFAULT: Self = Self {
        accel: ACCEL_THRESHOLD,
        gyro: GYRO_THRESHOLD,
        sound: SOUND_THRESHOLD,
    };
}

impl Default for Thresholds {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Credentials and base URLs of the two remote services, built once at boot.
#[derive(Debug, Clone)]
pub struct RemoteEndpoints {
    /// Time-series ingestion endpoint (full path, no query).
    pub telemetry_url: String,
    pub telemetry_api_key: String,
    /// Messaging bot API root, without the `/bot<token>` segment.
    pub bot_base_url: String,
    pub bot_token: String,
    pub chat_id: String,
}

impl RemoteEndpoints {
    /// Endpoints on the default public services.
    pub fn new(telemetry_api_key: &str, bot_token: &str, chat_id: &str) -> Self {
        Self {
            telemetry_url: DEFAULT_TELEMETRY_URL.into(),
            telemetry_api_key: telemetry_api_key.into(),
            bot_base_url: DEFAULT_BOT_BASE_URL.into(),
            bot_token: bot_token.into(),
            chat_id: chat_id.into(),
        }
    }
}
