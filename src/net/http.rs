// NVH Monitor — HTTP Client
//
// One fresh connection per GET, bounded by an explicit timeout. Only the
// status line is consumed; the body is dropped with the response.

use std::time::Duration;

use embedded_svc::http::client::Client;
use embedded_svc::http::Status;
use esp_idf_svc::http::client::{Configuration, EspHttpConnection};
use nvh_core::{Error, HttpGet, HttpStatus};

pub struct EspHttpGet {
    timeout: Duration,
}

impl EspHttpGet {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

fn unreachable<E: core::fmt::Debug>(e: E) -> Error {
    Error::NetworkUnreachable(format!("{e:?}"))
}

impl HttpGet for EspHttpGet {
    fn get(&mut self, url: &str) -> nvh_core::Result<HttpStatus> {
        let config = Configuration {
            timeout: Some(self.timeout),
            crt_bundle_attach: Some(esp_idf_svc::sys::esp_crt_bundle_attach),
            ..Default::default()
        };
        let mut client = Client::wrap(EspHttpConnection::new(&config).map_err(unreachable)?);
        let request = client.get(url).map_err(unreachable)?;
        let response = request.submit().map_err(unreachable)?;
        Ok(response.status())
    }
}
