//! Wi-Fi station setup from the configured credentials

use crate::config::CredentialProvider;
use crate::utils::mask;
use anyhow::{anyhow, Result};
use embedded_svc::wifi::{self, AuthMethod, ClientConfiguration};
use esp_idf_svc::hal::modem::Modem;
use esp_idf_svc::{
    eventloop::EspSystemEventLoop,
    nvs::EspDefaultNvsPartition,
    wifi::{BlockingWifi, EspWifi},
};
use log::*;

/// Open network for an empty password, WPA2 otherwise
pub fn auth_method(password: &str) -> AuthMethod {
    if password.is_empty() {
        AuthMethod::None
    } else {
        AuthMethod::WPA2Personal
    }
}

/// Build the station configuration for the provider's network
pub fn client_configuration(provider: &impl CredentialProvider) -> Result<wifi::Configuration> {
    let ssid = provider.ssid();
    let password = provider.password();

    Ok(wifi::Configuration::Client(ClientConfiguration {
        ssid: ssid
            .try_into()
            .map_err(|_| anyhow!("SSID `{ssid}` does not fit the driver"))?,
        password: password
            .try_into()
            .map_err(|_| anyhow!("Password does not fit the driver"))?,
        auth_method: auth_method(password),
        ..Default::default()
    }))
}

/// Join the configured network and block until an IP is assigned
pub fn connect(
    modem: Modem,
    provider: &impl CredentialProvider,
) -> Result<BlockingWifi<EspWifi<'static>>> {
    info!("Starting Wi-Fi station...");

    let sys_loop = EspSystemEventLoop::take()?;
    let nvs = EspDefaultNvsPartition::take()?;

    let mut wifi = BlockingWifi::wrap(
        EspWifi::new(modem, sys_loop.clone(), Some(nvs))?,
        sys_loop,
    )?;

    wifi.set_configuration(&client_configuration(provider)?)?;
    wifi.start()?;

    info!(
        "Connecting to WIFI_SSID `{}` with WIFI_PASS `{}`",
        provider.ssid(),
        mask(provider.password())
    );
    wifi.connect()?;
    wifi.wait_netif_up()?;

    let ip_info = wifi.wifi().sta_netif().get_ip_info()?;
    info!("Wi-Fi connected, IP: {}", ip_info.ip);

    Ok(wifi)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Network(&'static str, &'static str);

    impl CredentialProvider for Network {
        fn ssid(&self) -> &str {
            self.0
        }

        fn password(&self) -> &str {
            self.1
        }

        fn firestore_url(&self) -> String {
            "https://firestore.googleapis.com/v1".to_string()
        }
    }

    #[test]
    fn test_auth_method() {
        assert_eq!(auth_method(""), AuthMethod::None);
        assert_eq!(auth_method("password123"), AuthMethod::WPA2Personal);
    }

    #[test]
    fn test_client_configuration() {
        let config = client_configuration(&Network("home-net", "password123")).unwrap();
        let wifi::Configuration::Client(client) = config else {
            panic!("expected a client configuration");
        };
        assert_eq!(client.ssid.as_str(), "home-net");
        assert_eq!(client.password.as_str(), "password123");
        assert_eq!(client.auth_method, AuthMethod::WPA2Personal);
    }

    #[test]
    fn test_client_configuration_rejects_long_ssid() {
        let long: &'static str = Box::leak("s".repeat(33).into_boxed_str());
        assert!(client_configuration(&Network(long, "")).is_err());
    }

    #[test]
    fn test_client_configuration_limits() {
        let ssid: &'static str = Box::leak("s".repeat(32).into_boxed_str());
        let psk: &'static str = Box::leak("f".repeat(64).into_boxed_str());
        assert!(client_configuration(&Network(ssid, psk)).is_ok());

        let long: &'static str = Box::leak("f".repeat(65).into_boxed_str());
        assert!(client_configuration(&Network("home-net", long)).is_err());
    }
}
