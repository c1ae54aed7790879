// NVH Monitor — Telemetry Reporter & Alert Notifier
//
// Both remote services take a plain HTTP GET with query parameters; only the
// status code of the response is used.

use std::fmt::Write;

use crate::config::{RemoteEndpoints, NOISE_MESSAGE, VIBRATION_MESSAGE};
use crate::error::Result;
use crate::evaluator::Alert;

pub type HttpStatus = u16;

/// Single-attempt blocking GET. Implementations must bound the request with a
/// timeout and map transport failures to
/// [`Error::NetworkUnreachable`](crate::Error::NetworkUnreachable).
pub trait HttpGet {
    fn get(&mut self, url: &str) -> Result<HttpStatus>;
}

// ---------------------------------------------------------------------------
// Time-series telemetry
// ---------------------------------------------------------------------------

pub struct TelemetryReporter<H> {
    http: H,
    base_url: String,
    api_key: String,
}

impl<H: HttpGet> TelemetryReporter<H> {
    pub fn new(http: H, endpoints: &RemoteEndpoints) -> Self {
        Self {
            http,
            base_url: endpoints.telemetry_url.clone(),
            api_key: endpoints.telemetry_api_key.clone(),
        }
    }

    /// `field1` = magnitude (two decimals), `field2` = sound level,
    /// `field3` = status flag.
    pub fn url(&self, magnitude: f32, sound: u16, status: u8) -> String {
        format!(
            "{}?api_key={}&field1={:.2}&field2={}&field3={}",
            self.base_url,
            percent_encode(&self.api_key),
            magnitude,
            sound,
            status
        )
    }

    pub fn send(&mut self, magnitude: f32, sound: u16, status: u8) -> Result<HttpStatus> {
        let url = self.url(magnitude, sound, status);
        self.http.get(&url)
    }

    pub fn http(&self) -> &H {
        &self.http
    }
}

// ---------------------------------------------------------------------------
// Bot messages
// ---------------------------------------------------------------------------

pub struct AlertNotifier<H> {
    http: H,
    base_url: String,
    token: String,
    chat_id: String,
}

impl<H: HttpGet> AlertNotifier<H> {
    pub fn new(http: H, endpoints: &RemoteEndpoints) -> Self {
        Self {
            http,
            base_url: endpoints.bot_base_url.trim_end_matches('/').to_string(),
            token: endpoints.bot_token.clone(),
            chat_id: endpoints.chat_id.clone(),
        }
    }

    pub fn url(&self, message: &str) -> String {
        format!(
            "{}/bot{}/sendMessage?chat_id={}&text={}",
            self.base_url,
            self.token,
            percent_encode(&self.chat_id),
            percent_encode(message)
        )
    }

    pub fn notify(&mut self, message: &str) -> Result<HttpStatus> {
        let url = self.url(message);
        self.http.get(&url)
    }

    pub fn http(&self) -> &H {
        &self.http
    }
}

/// Fixed message text sent for each alert cause.
pub fn alert_message(alert: Alert) -> &'static str {
    match alert {
        Alert::Vibration => VIBRATION_MESSAGE,
        Alert::Noise => NOISE_MESSAGE,
    }
}

/// Percent-encode everything outside the RFC 3986 unreserved set, as UTF-8.
pub fn percent_encode(input: &str) -> String {
    let mut out = String::with_capacity(input.len() * 3);
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(byte as char)
            }
            _ => {
                let _ = write!(out, "%{:02X}", byte);
            }
        }
    }
    out
}
