//! Configuration for the siteforge CLI.
//!
//! TOML profiles, the flat `env.json` format used by earlier site-build
//! scripts, credential resolution (env + keyring + plaintext), and
//! translation into `siteforge_core` runtime types. The CLI layers its
//! flag overrides on top.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Json, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

use siteforge_core::{
    LatLng, LocationSettings, ProvisionConfig, SessionConfig, TemplateIds, TlsMode,
};

pub const DEFAULT_BASE_URL: &str = "https://api.mist.com/api/v1";
pub const LEGACY_ENV_FILE: &str = "env.json";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no API token configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("profile '{name}' not found")]
    ProfileNotFound { name: String, available: Vec<String> },

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named organization profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Device list consulted before prompting for MACs.
    #[serde(default = "default_device_file")]
    pub device_file: PathBuf,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            timeout: default_timeout(),
            device_file: default_device_file(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    30
}
fn default_device_file() -> PathBuf {
    PathBuf::from("devices.txt")
}
fn default_base_url() -> String {
    DEFAULT_BASE_URL.into()
}

/// A named organization profile.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Profile {
    /// API root (e.g., "https://api.eu.mist.com/api/v1").
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Organization id.
    #[serde(default)]
    pub org_id: String,

    /// API token in plaintext. Prefer keyring or `token_env`.
    pub token: Option<String>,

    /// Environment variable name containing the API token.
    pub token_env: Option<String>,

    pub gateway_template_id: Option<String>,
    pub network_template_id: Option<String>,
    /// WLAN template every new site is attached to.
    #[serde(default)]
    pub wlan_template_id: String,

    /// Location and variables applied to new sites.
    #[serde(default)]
    pub site: SiteDefaults,

    /// Path to custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Accept invalid TLS certificates.
    pub insecure: Option<bool>,

    /// Override timeout.
    pub timeout: Option<u64>,

    /// Override device file.
    pub device_file: Option<PathBuf>,
}

/// Site-level settings shared by every site a profile creates.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SiteDefaults {
    pub timezone: Option<String>,
    pub country_code: Option<String>,
    pub address: Option<String>,
    pub latlng: Option<LatLng>,
    /// Present (even empty) means the settings patch is sent.
    pub vars: Option<Map<String, Value>>,
}

// ── Legacy env.json ─────────────────────────────────────────────────

/// The flat `env.json` layout of the original site-build scripts.
#[derive(Debug, Deserialize)]
struct LegacyEnv {
    token: Option<String>,
    #[serde(rename = "baseUrl", default = "default_base_url")]
    base_url: String,
    #[serde(rename = "orgId")]
    org_id: String,
    gatewaytemplate_id: Option<String>,
    networktemplate_id: Option<String>,
    wlantemplate_id: String,
    #[serde(rename = "siteSettings", default)]
    site_settings: SiteDefaults,
}

impl From<LegacyEnv> for Profile {
    fn from(env: LegacyEnv) -> Self {
        Self {
            base_url: env.base_url,
            org_id: env.org_id,
            token: env.token,
            gateway_template_id: env.gatewaytemplate_id,
            network_template_id: env.networktemplate_id,
            wlan_template_id: env.wlantemplate_id,
            site: env.site_settings,
            ..Self::default()
        }
    }
}

/// Read an `env.json` file as a profile. `Ok(None)` when the file is absent.
pub fn load_legacy_env(path: &Path) -> Result<Option<Profile>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    debug!(path = %path.display(), "loading legacy env file");
    let env: LegacyEnv = Figment::from(Json::file(path)).extract()?;
    Ok(Some(env.into()))
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "siteforge", "siteforge").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("siteforge");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from file + environment.
///
/// Environment keys use `__` as the nesting separator, e.g.
/// `SITEFORGE_PROFILES__LAB__ORG_ID`.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let path = path.map_or_else(config_path, Path::to_path_buf);
    debug!(path = %path.display(), "loading config");

    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(&path))
        .merge(Env::prefixed("SITEFORGE_").split("__").ignore(&["token"]));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Pick the profile to use.
///
/// A named profile from the config file wins; otherwise a legacy
/// `env.json` in the working directory stands in.
pub fn select_profile(
    config: &Config,
    name: &str,
    legacy_env: &Path,
) -> Result<Profile, ConfigError> {
    if let Some(profile) = config.profiles.get(name) {
        return Ok(profile.clone());
    }
    if let Some(profile) = load_legacy_env(legacy_env)? {
        return Ok(profile);
    }

    let mut available: Vec<String> = config.profiles.keys().cloned().collect();
    available.sort();
    Err(ConfigError::ProfileNotFound {
        name: name.into(),
        available,
    })
}

// ── Credential resolution (without CLI flags) ───────────────────────

/// Resolve an API token from the credential chain (no CLI flag step).
pub fn resolve_token(profile: &Profile, profile_name: &str) -> Result<SecretString, ConfigError> {
    // 1. Profile's token_env → env var lookup
    if let Some(ref env_name) = profile.token_env {
        if let Ok(val) = std::env::var(env_name) {
            return Ok(SecretString::from(val));
        }
    }

    // 2. System keyring
    if let Ok(entry) = keyring::Entry::new("siteforge", &format!("{profile_name}/token")) {
        if let Ok(secret) = entry.get_password() {
            return Ok(SecretString::from(secret));
        }
    }

    // 3. Plaintext in config
    if let Some(ref token) = profile.token {
        return Ok(SecretString::from(token.clone()));
    }

    Err(ConfigError::NoCredentials {
        profile: profile_name.into(),
    })
}

// ── Translation to core types ───────────────────────────────────────

/// Build the API session from a profile and an already-resolved token.
pub fn profile_to_session(
    profile: &Profile,
    token: SecretString,
    defaults: &Defaults,
) -> Result<SessionConfig, ConfigError> {
    let base_url: url::Url = profile
        .base_url
        .parse()
        .map_err(|_| ConfigError::Validation {
            field: "base_url".into(),
            reason: format!("invalid URL: {}", profile.base_url),
        })?;

    if profile.org_id.trim().is_empty() {
        return Err(ConfigError::Validation {
            field: "org_id".into(),
            reason: "must not be empty".into(),
        });
    }

    let timeout_secs = profile.timeout.unwrap_or(defaults.timeout);
    if timeout_secs == 0 {
        return Err(ConfigError::Validation {
            field: "timeout".into(),
            reason: "must be at least 1 second".into(),
        });
    }

    let tls = if profile.insecure.unwrap_or(false) {
        TlsMode::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsMode::CustomCa(ca_path.clone())
    } else {
        TlsMode::System
    };

    Ok(SessionConfig {
        base_url,
        org_id: profile.org_id.clone(),
        token,
        tls,
        timeout: Duration::from_secs(timeout_secs),
    })
}

/// Build the per-site provisioning settings from a profile.
pub fn profile_to_provision(
    profile: &Profile,
    defaults: &Defaults,
) -> Result<ProvisionConfig, ConfigError> {
    if profile.wlan_template_id.trim().is_empty() {
        return Err(ConfigError::Validation {
            field: "wlan_template_id".into(),
            reason: "must not be empty".into(),
        });
    }

    let site = &profile.site;
    Ok(ProvisionConfig {
        templates: TemplateIds {
            gateway: profile.gateway_template_id.clone(),
            network: profile.network_template_id.clone(),
            wlan: profile.wlan_template_id.clone(),
        },
        location: LocationSettings {
            timezone: site.timezone.clone(),
            country_code: site.country_code.clone(),
            address: site.address.clone(),
            latlng: site.latlng,
        },
        vars: site.vars.clone(),
        device_file: profile
            .device_file
            .clone()
            .unwrap_or_else(|| defaults.device_file.clone()),
    })
}
