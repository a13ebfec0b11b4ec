//! CLI configuration -- thin wrapper around `labres_config` shared types.
//!
//! Re-exports the shared types and adds resolution that respects
//! `GlobalOpts` flag overrides (--service, --timeout, --insecure).

use labres_config::ConfigError;
use labres_core::ServiceConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use labres_config::{
    Config, Profile, config_path, load_config, load_config_or_default, save_config,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| labres_config::DEFAULT_PROFILE.into())
}

/// Build a `ServiceConfig` from the config file, profile, and CLI overrides.
///
/// An unknown profile is only an error when `--service` does not supply
/// the URL on its own.
pub fn resolve_service_config(global: &GlobalOpts) -> Result<ServiceConfig, CliError> {
    let cfg = load_config()?;

    let mut profile = match cfg.resolve_profile(global.profile.as_deref()) {
        Ok((name, profile)) => {
            tracing::debug!(profile = %name, "using profile");
            profile
        }
        Err(ConfigError::UnknownProfile { .. }) if global.service.is_some() => Profile::local(),
        Err(err) => return Err(err.into()),
    };

    // Flag > env > profile
    if let Some(ref url) = global.service {
        profile.service_url.clone_from(url);
    }
    if let Some(timeout) = global.timeout {
        profile.timeout = Some(timeout);
    }
    if global.insecure {
        profile.insecure = Some(true);
    }

    Ok(labres_config::profile_to_service_config(
        &profile,
        &cfg.defaults,
    )?)
}
