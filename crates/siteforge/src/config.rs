//! CLI configuration: `siteforge_config` plus `GlobalOpts` overrides.

use std::path::{Path, PathBuf};

use secrecy::SecretString;

use siteforge_config::{Config, Defaults, LEGACY_ENV_FILE, Profile};
use siteforge_core::{ProvisionConfig, SessionConfig};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// The API session for one organization, plus the profile it came from.
pub struct Resolved {
    pub session: SessionConfig,
    profile: Profile,
    defaults: Defaults,
}

impl Resolved {
    /// Site-build settings. Only `build` needs these, so a profile without
    /// a WLAN template still serves the listing commands.
    pub fn provision(&self) -> Result<ProvisionConfig, CliError> {
        Ok(siteforge_config::profile_to_provision(
            &self.profile,
            &self.defaults,
        )?)
    }
}

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Load config, pick the profile, and apply flag overrides.
///
/// `device_file` (from `build --devices`) beats the profile's file.
pub fn resolve(global: &GlobalOpts, device_file: Option<&Path>) -> Result<Resolved, CliError> {
    let config = siteforge_config::load_config(global.config.as_deref())?;
    let profile_name = active_profile_name(global, &config);
    let profile = select_profile(global, &config, &profile_name)?;
    let profile = apply_overrides(profile, global, device_file);

    let token = resolve_token_with_flag(&profile, &profile_name, global)?;
    let session = siteforge_config::profile_to_session(&profile, token, &config.defaults)?;

    tracing::debug!(
        profile = %profile_name,
        base_url = %session.base_url,
        org_id = %session.org_id,
        "resolved configuration"
    );
    Ok(Resolved {
        session,
        profile,
        defaults: config.defaults,
    })
}

/// Fall back to a flags-only profile when `--org` is given and nothing
/// is configured.
fn select_profile(
    global: &GlobalOpts,
    config: &Config,
    profile_name: &str,
) -> Result<Profile, CliError> {
    match siteforge_config::select_profile(config, profile_name, Path::new(LEGACY_ENV_FILE)) {
        Ok(profile) => Ok(profile),
        Err(siteforge_config::ConfigError::ProfileNotFound { .. }) if global.org.is_some() => {
            Ok(Profile {
                base_url: siteforge_config::DEFAULT_BASE_URL.into(),
                ..Profile::default()
            })
        }
        Err(e) => Err(e.into()),
    }
}

/// CLI flags take priority over profile values.
fn apply_overrides(mut profile: Profile, global: &GlobalOpts, device_file: Option<&Path>) -> Profile {
    if let Some(ref url) = global.base_url {
        profile.base_url.clone_from(url);
    }
    if let Some(ref org) = global.org {
        profile.org_id.clone_from(org);
    }
    if let Some(timeout) = global.timeout {
        profile.timeout = Some(timeout);
    }
    if let Some(path) = device_file {
        profile.device_file = Some(PathBuf::from(path));
    }
    profile
}

fn resolve_token_with_flag(
    profile: &Profile,
    profile_name: &str,
    global: &GlobalOpts,
) -> Result<SecretString, CliError> {
    if let Some(ref token) = global.token {
        return Ok(SecretString::from(token.clone()));
    }
    Ok(siteforge_config::resolve_token(profile, profile_name)?)
}
