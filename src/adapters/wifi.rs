//! Wi-Fi soft-AP bring-up.
//!
//! The bridge hosts its own access point; the operator's phone connects
//! directly to reach the control page. One-shot setup, no reconnection
//! logic — the AP stays up for the life of the process.
//!
//! ## cfg gating
//!
//! - **`target_os = "espidf"`**: real ESP-IDF Wi-Fi driver calls.
//! - **all other targets**: simulation stub for host-side tests.

use log::info;

#[cfg(target_os = "espidf")]
pub struct AccessPoint {
    // Held for its Drop: the AP stops when this is dropped.
    _wifi: esp_idf_svc::wifi::EspWifi<'static>,
}

#[cfg(target_os = "espidf")]
impl AccessPoint {
    /// Start the soft AP and block until it is up.
    pub fn start(
        modem: esp_idf_svc::hal::modem::Modem,
        ssid: &str,
        passphrase: &str,
    ) -> anyhow::Result<Self> {
        use esp_idf_svc::eventloop::EspSystemEventLoop;
        use esp_idf_svc::nvs::EspDefaultNvsPartition;
        use esp_idf_svc::wifi::{
            AccessPointConfiguration, AuthMethod, BlockingWifi, Configuration, EspWifi,
        };

        let sysloop = EspSystemEventLoop::take()?;
        let nvs = EspDefaultNvsPartition::take()?;

        let mut wifi = EspWifi::new(modem, sysloop.clone(), Some(nvs))?;
        wifi.set_configuration(&Configuration::AccessPoint(AccessPointConfiguration {
            ssid: ssid
                .try_into()
                .map_err(|()| anyhow::anyhow!("AP SSID exceeds 32 bytes"))?,
            password: passphrase
                .try_into()
                .map_err(|()| anyhow::anyhow!("AP passphrase exceeds 64 bytes"))?,
            auth_method: AuthMethod::WPA2Personal,
            ..Default::default()
        }))?;

        {
            let mut blocking = BlockingWifi::wrap(&mut wifi, sysloop)?;
            blocking.start()?;
            blocking.wait_netif_up()?;
        }

        let ip = wifi.ap_netif().get_ip_info()?.ip;
        info!("wifi: AP '{}' up at {}", ssid, ip);
        Ok(Self { _wifi: wifi })
    }
}

#[cfg(not(target_os = "espidf"))]
pub struct AccessPoint;

#[cfg(not(target_os = "espidf"))]
impl AccessPoint {
    pub fn start(ssid: &str, _passphrase: &str) -> anyhow::Result<Self> {
        info!("wifi(sim): AP '{}' up", ssid);
        Ok(Self)
    }
}
