//! Command handlers and the shared controller session.

pub mod config_cmd;
pub mod reservations;

use labres_api::ReservationClient;
use labres_core::{PendingRequest, ServiceConfig, ViewController};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

/// One controller session per invocation, same state machine as the TUI.
pub struct Session {
    pub controller: ViewController<ReservationClient>,
    service: ServiceConfig,
}

impl Session {
    /// Resolve config (profile + flags) and build the controller.
    pub fn open(global: &GlobalOpts) -> Result<Self, CliError> {
        let service = crate::config::resolve_service_config(global)?;
        tracing::debug!(url = %service.base_url, "opening session");
        let client = service.connect()?;
        Ok(Self {
            controller: ViewController::new(client),
            service,
        })
    }

    /// Settle `request` (and any follow-up) behind a spinner, then surface
    /// whatever failure the controller recorded.
    pub async fn run(
        &mut self,
        request: Option<PendingRequest>,
        global: &GlobalOpts,
        label: &str,
    ) -> Result<(), CliError> {
        self.settle(request, global, label).await;
        self.check()
    }

    /// Settle without checking for failure.
    pub async fn settle(
        &mut self,
        request: Option<PendingRequest>,
        global: &GlobalOpts,
        label: &str,
    ) {
        if let Some(request) = request {
            let spinner = output::spinner(global, label);
            self.controller.settle(request).await;
            spinner.finish_and_clear();
        }
    }

    /// Convert the controller's recorded failure, if any.
    pub fn check(&self) -> Result<(), CliError> {
        match self.controller.last_failure() {
            None => Ok(()),
            Some(failure) => {
                let shown = self
                    .controller
                    .state()
                    .error
                    .clone()
                    .unwrap_or_else(|| failure.to_string());
                Err(CliError::from_failure(failure, shown, &self.service))
            }
        }
    }
}

/// Map a dialoguer / interactive I/O failure into CliError.
pub(crate) fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}
