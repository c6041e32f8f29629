//! Wi-Fi credentials and Firestore endpoint provider
//!
//! Set WIFI_SSID, WIFI_PASS and FIRESTORE_URL when building.

mod config;
mod utils;
mod wifi;

use esp_idf_svc::hal::peripherals::Peripherals;
use log::*;

use crate::config::{firestore_url, validate, BuildCredentials};

fn main() -> anyhow::Result<()> {
    esp_idf_svc::sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();

    info!("Loading build-time credentials...");

    let credentials = BuildCredentials;
    if let Err(e) = validate(&credentials) {
        error!("Invalid configuration: {e:#}");
        return Err(e);
    }

    let peripherals = Peripherals::take()?;
    let wifi = wifi::connect(peripherals.modem, &credentials)?;

    info!("Firestore endpoint: {}", firestore_url());

    // Keep wifi running beyond when main() returns (forever)
    // https://doc.rust-lang.org/stable/core/mem/fn.forget.html
    core::mem::forget(wifi);

    Ok(())
}
