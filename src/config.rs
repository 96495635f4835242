//! Console configuration: JSON file plus environment overrides.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ConsoleError, ConsoleResult};
use crate::moderation::core::config::ModerationConfig;
use crate::orders::config::{OrderConfig, is_non_negative};
use crate::referrals::ReferralProgram;

/// Default server port.
pub const DEFAULT_PORT: u16 = 3000;

/// Environment variable naming the JSON config file.
pub const CONFIG_PATH_ENV: &str = "CONSOLE_CONFIG";
/// Environment variable overriding the server port.
pub const PORT_ENV: &str = "CONSOLE_PORT";
/// Environment variable overriding the seed file.
pub const SEED_PATH_ENV: &str = "CONSOLE_SEED_PATH";

/// Top-level console configuration.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Chat moderation settings.
    pub moderation: ModerationConfig,
    /// Order pricing and shipping settings.
    pub orders: OrderConfig,
    /// Referral program constants.
    pub referrals: ReferralProgram,
}

/// HTTP server settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listening port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: DEFAULT_PORT }
    }
}

impl ConsoleConfig {
    /// Read a JSON config file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> ConsoleResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Load from `CONSOLE_CONFIG` (if set), apply env overrides and validate.
    ///
    /// # Errors
    /// Returns an error if the file is unreadable, an override is malformed,
    /// or validation fails.
    pub fn from_env() -> ConsoleResult<Self> {
        let mut config = match std::env::var_os(CONFIG_PATH_ENV) {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => Self::default(),
        };
        config.apply_overrides(
            std::env::var(PORT_ENV).ok().as_deref(),
            std::env::var_os(SEED_PATH_ENV).map(PathBuf::from),
        )?;
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides taken from the environment.
    ///
    /// # Errors
    /// Returns an error if `port` is not a valid port number.
    pub fn apply_overrides(
        &mut self,
        port: Option<&str>,
        seed_path: Option<PathBuf>,
    ) -> ConsoleResult<()> {
        if let Some(raw) = port {
            self.server.port = raw.trim().parse().map_err(|_| {
                ConsoleError::InvalidConfig(format!("{PORT_ENV} is not a valid port: {raw}"))
            })?;
        }
        if let Some(path) = seed_path {
            self.moderation.seed_path = Some(path);
        }
        Ok(())
    }

    /// Validate every section.
    ///
    /// # Errors
    /// Returns the first invalid value found.
    pub fn validate(&self) -> ConsoleResult<()> {
        self.moderation.validate()?;
        self.orders
            .validate()
            .map_err(|e| ConsoleError::InvalidConfig(e.to_string()))?;

        let referrals = &self.referrals;
        if !is_non_negative(referrals.max_total_discount) {
            return Err(ConsoleError::InvalidConfig(
                "referrals.max_total_discount must be >= 0".to_string(),
            ));
        }
        if referrals.referrals_needed == 0 {
            return Err(ConsoleError::InvalidConfig(
                "referrals.referrals_needed must be > 0".to_string(),
            ));
        }

        Ok(())
    }
}
