//! Preference resolution for the CLI.
//!
//! Layering: struct defaults < config file < `MUTECTL_*` env vars (handled
//! by `mutectl-config`) < explicit CLI flags (applied here). The resolved
//! value is handed to the client at construction — nothing downstream reads
//! configuration ambiently.

use mutectl_api::{ControllerClient, TransportConfig};
use mutectl_config::Preferences;

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Load preferences and apply CLI-flag overrides.
pub fn resolve_preferences(global: &GlobalOpts) -> Result<Preferences, CliError> {
    let mut prefs = mutectl_config::load_preferences()?;

    if let Some(ref endpoint) = global.endpoint {
        prefs.api_endpoint = endpoint.clone();
    }
    if let Some(timeout) = global.timeout {
        prefs.timeout = timeout;
    }

    // Re-validate: flag overrides can introduce bad values too.
    prefs.validate()?;
    Ok(prefs)
}

/// Build a [`ControllerClient`] from resolved preferences.
pub fn build_client(prefs: &Preferences) -> Result<ControllerClient, CliError> {
    let transport = TransportConfig::with_timeout_secs(prefs.timeout);
    Ok(ControllerClient::new(&prefs.api_endpoint, &transport)?)
}
