//! Application state shared across all request handlers.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::config::ConsoleConfig;
use crate::error::ConsoleResult;
use crate::moderation::clock::SystemClock;
use crate::moderation::notify::RecordingNotifier;
use crate::moderation::store::ModerationStore;
use crate::orders::shipping::{ShippingQuoter, VolumetricQuoter};

/// Shared application state.
pub struct AppState {
    /// Moderation store; one operation per lock.
    pub store: Mutex<ModerationStore>,
    /// Warnings issued since start.
    pub notices: RecordingNotifier,
    /// Shipping estimator.
    pub quoter: Arc<dyn ShippingQuoter>,
    /// Loaded configuration.
    pub config: ConsoleConfig,
}

impl AppState {
    /// Create the state from configuration.
    ///
    /// # Errors
    /// Returns an error if the seed conversations cannot be loaded.
    pub fn new(config: ConsoleConfig) -> ConsoleResult<Arc<Self>> {
        let notices = RecordingNotifier::with_limit(config.moderation.notice_history);
        let mut store = ModerationStore::from_config(
            &config.moderation,
            Arc::new(notices.clone()),
            Arc::new(SystemClock),
        )?;
        store.ensure_default_selection();

        let quoter = Arc::new(VolumetricQuoter::new(config.orders.shipping.clone()));

        Ok(Self::with_parts(store, notices, quoter, config))
    }

    /// Assemble the state from prebuilt parts.
    #[must_use]
    pub fn with_parts(
        store: ModerationStore,
        notices: RecordingNotifier,
        quoter: Arc<dyn ShippingQuoter>,
        config: ConsoleConfig,
    ) -> Arc<Self> {
        Arc::new(Self {
            store: Mutex::new(store),
            notices,
            quoter,
            config,
        })
    }
}
