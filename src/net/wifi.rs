// NVH Monitor — Wi-Fi Station
//
// Starts station-mode association without blocking; the caller polls
// `is_connected` and re-issues `reconnect` while the station stays down.

use anyhow::anyhow;
use esp_idf_hal::modem::Modem;
use esp_idf_hal::peripheral::Peripheral;
use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::nvs::EspDefaultNvsPartition;
use esp_idf_svc::wifi::{ClientConfiguration, Configuration, EspWifi};
use log::info;
use nvh_core::{Error, WirelessLink};

pub struct WifiLink {
    wifi: EspWifi<'static>,
}

impl WifiLink {
    pub fn new(
        modem: impl Peripheral<P = Modem> + 'static,
        sysloop: EspSystemEventLoop,
        nvs: Option<EspDefaultNvsPartition>,
    ) -> anyhow::Result<Self> {
        let wifi = EspWifi::new(modem, sysloop, nvs)?;
        Ok(Self { wifi })
    }

    /// Configure STA mode and kick off association.
    pub fn connect(&mut self, ssid: &str, password: &str) -> anyhow::Result<()> {
        info!("Setting WiFi configuration (STA mode, SSID '{}')", ssid);
        let wifi_config = Configuration::Client(ClientConfiguration {
            ssid: ssid
                .try_into()
                .map_err(|_| anyhow!("SSID '{}' is too long", ssid))?,
            password: password
                .try_into()
                .map_err(|_| anyhow!("WiFi passphrase is too long"))?,
            ..Default::default()
        });

        self.wifi.set_configuration(&wifi_config)?;
        self.wifi.start()?;
        self.wifi.connect()?;
        Ok(())
    }

    pub fn log_ip_info(&self) {
        match self.wifi.sta_netif().get_ip_info() {
            Ok(ip_info) => info!("Connected: IP {} gateway {}", ip_info.ip, ip_info.subnet.gateway),
            Err(e) => log::warn!("Connected, but IP info unavailable: {}", e),
        }
    }
}

impl WirelessLink for WifiLink {
    fn is_connected(&self) -> bool {
        self.wifi.is_connected().unwrap_or(false) && self.wifi.sta_netif().is_up().unwrap_or(false)
    }

    fn reconnect(&mut self) -> nvh_core::Result<()> {
        // A stale attempt may still be in flight; `connect` replaces it.
        self.wifi
            .connect()
            .map_err(|e| Error::NetworkUnreachable(format!("WiFi connect: {e}")))
    }
}
