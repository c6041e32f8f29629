//! Build-time credentials and the Firestore endpoint
//!
//! Values are read from the build environment (`WIFI_SSID`, `WIFI_PASS`,
//! `FIRESTORE_URL`) and are empty when unset.

use anyhow::{bail, ensure, Result};
use log::*;

macro_rules! get_env_or_default {
    ($env:literal, $default:literal) => {
        match option_env!($env) {
            Some(val) => val,
            None => $default,
        }
    };
}

const SSID: &str = get_env_or_default!("WIFI_SSID", "");
const PASSWORD: &str = get_env_or_default!("WIFI_PASS", "");
const FIRESTORE_URL: &str = get_env_or_default!("FIRESTORE_URL", "");

// Limits of the Wi-Fi driver's fixed-size config fields
pub const MAX_SSID_LEN: usize = 32;
pub const MIN_PASSWORD_LEN: usize = 8;
pub const MAX_PASSWORD_LEN: usize = 64;
// A password of exactly this length is taken as a raw hex PSK
pub const HEX_PSK_LEN: usize = 64;

/// Configured network name, empty if unset
pub fn ssid() -> &'static str {
    SSID
}

/// Configured network secret, empty if unset
pub fn password() -> &'static str {
    PASSWORD
}

/// Configured Firestore endpoint URL, empty if unset
pub fn firestore_url() -> String {
    FIRESTORE_URL.to_string()
}

/// Source of the network credentials and remote endpoint used by the firmware
pub trait CredentialProvider {
    fn ssid(&self) -> &str;
    fn password(&self) -> &str;
    fn firestore_url(&self) -> String;
}

/// Credentials baked in at build time
#[derive(Debug, Clone, Copy, Default)]
pub struct BuildCredentials;

impl CredentialProvider for BuildCredentials {
    fn ssid(&self) -> &str {
        ssid()
    }

    fn password(&self) -> &str {
        password()
    }

    fn firestore_url(&self) -> String {
        firestore_url()
    }
}

/// Check the provided values against what the Wi-Fi driver and the
/// Firestore REST endpoint accept.
///
/// An empty password is allowed and means an open network.
pub fn validate(provider: &impl CredentialProvider) -> Result<()> {
    let ssid = provider.ssid();
    ensure!(!ssid.is_empty(), "WIFI_SSID is not set");
    ensure!(
        ssid.len() <= MAX_SSID_LEN,
        "WIFI_SSID is {} bytes (max: {})",
        ssid.len(),
        MAX_SSID_LEN
    );

    let password = provider.password();
    if password.is_empty() {
        warn!("WIFI_PASS is empty, joining `{ssid}` as an open network");
    } else {
        ensure!(
            (MIN_PASSWORD_LEN..=MAX_PASSWORD_LEN).contains(&password.len()),
            "WIFI_PASS is {} bytes (expected {}..={})",
            password.len(),
            MIN_PASSWORD_LEN,
            MAX_PASSWORD_LEN
        );
        if password.len() == HEX_PSK_LEN {
            ensure!(
                password.bytes().all(|b| b.is_ascii_hexdigit()),
                "WIFI_PASS is {HEX_PSK_LEN} bytes but not a hex PSK (passphrases are at most {} bytes)",
                HEX_PSK_LEN - 1
            );
        }
    }

    let url = provider.firestore_url();
    ensure!(!url.is_empty(), "FIRESTORE_URL is not set");
    let Some(rest) = url.strip_prefix("https://") else {
        bail!("FIRESTORE_URL must use https: `{url}`");
    };
    let host = rest.split(['/', '?']).next().unwrap_or_default();
    ensure!(!host.is_empty(), "FIRESTORE_URL has no host: `{url}`");

    debug!("Credentials valid for SSID `{ssid}`, Firestore host `{host}`");
    Ok(())
}
