//! Config subcommand handlers.

use std::io::IsTerminal;

use dialoguer::Input;

use labres_config::{DEFAULT_PROFILE, Defaults};
use labres_core::DEFAULT_SERVICE_URL;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config, Profile};
use crate::error::CliError;
use crate::output;

use super::prompt_err;

// ── Helpers ─────────────────────────────────────────────────────────

/// Format config for table display in TOML-like form.
fn format_config(cfg: &Config) -> String {
    use std::fmt::Write;
    let mut out = String::new();

    if let Some(ref default) = cfg.default_profile {
        let _ = writeln!(out, "default_profile = \"{default}\"");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "[defaults]");
    let _ = writeln!(out, "output = \"{}\"", cfg.defaults.output);
    let _ = writeln!(out, "color = \"{}\"", cfg.defaults.color);
    let _ = writeln!(out, "insecure = {}", cfg.defaults.insecure);
    let _ = writeln!(out, "timeout = {}", cfg.defaults.timeout);

    for (name, p) in &cfg.profiles {
        let _ = writeln!(out);
        let _ = writeln!(out, "[profiles.{name}]");
        let _ = writeln!(out, "service_url = \"{}\"", p.service_url);
        if let Some(ref ca) = p.ca_cert {
            let _ = writeln!(out, "ca_cert = \"{}\"", ca.display());
        }
        if let Some(insecure) = p.insecure {
            let _ = writeln!(out, "insecure = {insecure}");
        }
        if let Some(timeout) = p.timeout {
            let _ = writeln!(out, "timeout = {timeout}");
        }
    }

    out.trim_end().to_owned()
}

fn init(
    name: Option<String>,
    service_url: Option<String>,
    force: bool,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let config_path = config::config_path();
    if config_path.exists() && !force {
        return Err(CliError::Validation {
            field: "config".into(),
            reason: format!(
                "{} already exists (use --force to overwrite)",
                config_path.display()
            ),
        });
    }

    let interactive = std::io::stdin().is_terminal() && std::io::stderr().is_terminal();

    let profile_name = match name {
        Some(name) => name,
        None if interactive => Input::new()
            .with_prompt("Profile name")
            .default(DEFAULT_PROFILE.to_owned())
            .interact_text()
            .map_err(prompt_err)?,
        None => DEFAULT_PROFILE.into(),
    };

    let service_url = match service_url {
        Some(url) => url,
        None if interactive => Input::new()
            .with_prompt("Reservation service URL")
            .default(DEFAULT_SERVICE_URL.to_owned())
            .interact_text()
            .map_err(prompt_err)?,
        None => DEFAULT_SERVICE_URL.into(),
    };

    let profile = Profile {
        service_url,
        ..Profile::local()
    };
    // Reject a bad URL before anything is written.
    labres_config::profile_to_service_config(&profile, &Defaults::default())?;

    let mut cfg = Config {
        default_profile: Some(profile_name.clone()),
        ..Config::default()
    };
    cfg.profiles.insert(profile_name.clone(), profile);

    let path = config::save_config(&cfg)?;
    output::print_success(
        global,
        &format!("Configuration written to {}", path.display()),
    );
    output::print_note(global, &format!("  Active profile: {profile_name}"));
    Ok(())
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Init {
            name,
            service_url,
            force,
        } => init(name, service_url, force, global),

        ConfigCommand::Show => {
            let cfg = config::load_config()?;
            let out =
                output::render_single(&global.output, &cfg, format_config, |_| "config".into())?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), global.quiet);
            Ok(())
        }

        ConfigCommand::Profiles => {
            let cfg = config::load_config_or_default();
            let active = config::active_profile_name(global, &cfg);
            if cfg.profiles.is_empty() {
                output::print_note(global, "No profiles configured. Run: labres config init");
            } else {
                let lines: Vec<String> = cfg
                    .profiles
                    .iter()
                    .map(|(name, p)| {
                        let marker = if *name == active { " *" } else { "" };
                        format!("{name}{marker}\t{}", p.service_url)
                    })
                    .collect();
                output::print_output(&lines.join("\n"), global.quiet);
            }
            Ok(())
        }

        ConfigCommand::Use { name } => {
            let mut cfg = config::load_config_or_default();

            if !cfg.profiles.contains_key(&name) {
                let available: Vec<_> = cfg.profiles.keys().cloned().collect();
                return Err(CliError::ProfileNotFound {
                    name,
                    available: if available.is_empty() {
                        "(none)".into()
                    } else {
                        available.join(", ")
                    },
                });
            }

            cfg.default_profile = Some(name.clone());
            config::save_config(&cfg)?;
            output::print_success(global, &format!("Default profile set to '{name}'"));
            Ok(())
        }
    }
}
