use js_sys::Reflect;
use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;

use floristeria_core::{category_by_key, ConfigError};

pub(crate) const CONFIG_GLOBAL: &str = "__FLORISTERIA_CONFIG";

const SETTINGS_KEY: &str = "floristeria.settings.v1";
const SETTINGS_VERSION: u32 = 1;
const DEFAULT_PHONE: &str = "5215512345678";
const DEFAULT_TIMEOUT_MS: u32 = 8_000;
const MIN_TIMEOUT_MS: f64 = 1_000.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Environment {
    Local,
    Deployed,
}

pub(crate) fn detect_environment() -> Environment {
    let Some(window) = web_sys::window() else {
        return Environment::Local;
    };
    let location = window.location();
    if location
        .protocol()
        .map(|protocol| protocol == "file:")
        .unwrap_or(false)
    {
        return Environment::Local;
    }
    let host = location.hostname().unwrap_or_default();
    if host.is_empty() || host == "localhost" || host == "127.0.0.1" || host.ends_with(".local") {
        Environment::Local
    } else {
        Environment::Deployed
    }
}

#[derive(Clone, Debug)]
pub(crate) struct BootConfig {
    pub(crate) asset_base: String,
    pub(crate) whatsapp_phone: String,
    pub(crate) load_timeout_ms: u32,
}

/// Reads `window.__FLORISTERIA_CONFIG`. A missing object or missing fields
/// log a warning and fall back to environment-derived defaults; the page
/// always gets a usable configuration.
pub(crate) fn load_boot_config() -> BootConfig {
    let environment = detect_environment();
    let mut config = BootConfig {
        asset_base: default_asset_base(environment),
        whatsapp_phone: DEFAULT_PHONE.to_string(),
        load_timeout_ms: DEFAULT_TIMEOUT_MS,
    };
    match read_global(CONFIG_GLOBAL) {
        Ok(raw) => {
            if let Some(base) = string_field(&raw, "assetBase") {
                config.asset_base = base.trim_end_matches('/').to_string();
            }
            if let Some(phone) = string_field(&raw, "whatsappPhone") {
                config.whatsapp_phone = phone;
            }
            if let Some(timeout) = number_field(&raw, "loadTimeoutMs") {
                if timeout >= MIN_TIMEOUT_MS {
                    config.load_timeout_ms = timeout as u32;
                }
            }
        }
        Err(error) => {
            gloo::console::warn!(error.to_string(), "using defaults");
        }
    }
    config
}

fn read_global(name: &str) -> Result<JsValue, ConfigError> {
    let window = web_sys::window().ok_or(ConfigError::Missing)?;
    let value =
        Reflect::get(&window, &JsValue::from_str(name)).map_err(|_| ConfigError::Missing)?;
    if value.is_null() || value.is_undefined() {
        return Err(ConfigError::Missing);
    }
    Ok(value)
}

fn string_field(object: &JsValue, key: &str) -> Option<String> {
    Reflect::get(object, &JsValue::from_str(key))
        .ok()?
        .as_string()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn number_field(object: &JsValue, key: &str) -> Option<f64> {
    Reflect::get(object, &JsValue::from_str(key)).ok()?.as_f64()
}

fn default_asset_base(environment: Environment) -> String {
    match environment {
        Environment::Local => "assets".to_string(),
        Environment::Deployed => web_sys::window()
            .and_then(|window| window.location().origin().ok())
            .map(|origin| format!("{origin}/assets"))
            .unwrap_or_else(|| "assets".to_string()),
    }
}

#[derive(Clone, Serialize, Deserialize)]
struct SettingsBlob {
    version: u32,
    last_category: Option<String>,
}

fn load_blob() -> Option<SettingsBlob> {
    let window = web_sys::window()?;
    let storage = window.local_storage().ok()??;
    let raw = storage.get_item(SETTINGS_KEY).ok()??;
    let blob: SettingsBlob = serde_json::from_str(&raw).ok()?;
    if blob.version != SETTINGS_VERSION {
        return None;
    }
    Some(blob)
}

fn save_blob(blob: &SettingsBlob) {
    let Ok(raw) = serde_json::to_string(blob) else {
        return;
    };
    let Some(storage) =
        web_sys::window().and_then(|window| window.local_storage().ok().flatten())
    else {
        return;
    };
    let _ = storage.set_item(SETTINGS_KEY, &raw);
}

/// Stale keys (category renamed or removed) are dropped on load.
pub(crate) fn load_last_category() -> Option<String> {
    load_blob()?
        .last_category
        .filter(|key| category_by_key(key).is_some())
}

pub(crate) fn save_last_category(key: Option<&str>) {
    save_blob(&SettingsBlob {
        version: SETTINGS_VERSION,
        last_category: key.map(str::to_string),
    });
}
