//! Configuration for interactive sessions

use crate::error::{Result, SessionError};
use serde::{Deserialize, Serialize};
use statbot_core::UserId;
use std::time::Duration;

/// Overrides the browsing idle timeout, in seconds
pub const ENV_SESSION_TIMEOUT: &str = "STATBOT_SESSION_TIMEOUT_SECS";
/// Overrides the prompt/picker idle timeout, in seconds
pub const ENV_PROMPT_TIMEOUT: &str = "STATBOT_PROMPT_TIMEOUT_SECS";

/// Longest idle timeout a session accepts
pub const MAX_TIMEOUT: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Placeholder replaced by the owner mention in the rejection notice
const OWNER_PLACEHOLDER: &str = "{owner}";

/// Configuration shared by every session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Idle timeout of browsing sessions (paginator, help browser)
    pub idle_timeout: Duration,

    /// Idle timeout of sessions waiting for a decision (prompt, action picker)
    pub prompt_timeout: Duration,

    /// How long after an interaction the host still accepts its initial response
    pub ack_window: Duration,

    /// Capacity of each session's inbound event queue
    pub inbox_capacity: usize,

    /// Notice shown to anyone but the owner; `{owner}` becomes a mention
    pub rejection_notice: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            idle_timeout: Duration::from_secs(180),
            prompt_timeout: Duration::from_secs(60),
            ack_window: Duration::from_secs(3),
            inbox_capacity: 16,
            rejection_notice: "Only {owner} can use these controls.".to_string(),
        }
    }
}

impl SessionConfig {
    /// Create a new configuration builder
    pub fn builder() -> SessionConfigBuilder {
        SessionConfigBuilder::default()
    }

    /// Defaults overridden from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = Self::builder();
        if let Some(raw) = lookup(ENV_SESSION_TIMEOUT) {
            builder = builder.idle_timeout(parse_secs(ENV_SESSION_TIMEOUT, &raw)?);
        }
        if let Some(raw) = lookup(ENV_PROMPT_TIMEOUT) {
            builder = builder.prompt_timeout(parse_secs(ENV_PROMPT_TIMEOUT, &raw)?);
        }
        builder.build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        check_timeout("idle_timeout", self.idle_timeout)?;
        check_timeout("prompt_timeout", self.prompt_timeout)?;
        if self.inbox_capacity == 0 {
            return Err(SessionError::Config(
                "inbox_capacity must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// The rejection notice addressed at `owner`
    pub fn rejection_text(&self, owner: UserId) -> String {
        self.rejection_notice
            .replace(OWNER_PLACEHOLDER, &format!("<@{owner}>"))
    }
}

/// Idle timeouts must be non-zero and at most [`MAX_TIMEOUT`]
pub(crate) fn check_timeout(name: &str, timeout: Duration) -> Result<()> {
    if timeout.is_zero() {
        return Err(SessionError::Config(format!("{name} must be greater than 0")));
    }
    if timeout > MAX_TIMEOUT {
        return Err(SessionError::Config(format!(
            "{name} must be at most {} seconds",
            MAX_TIMEOUT.as_secs()
        )));
    }
    Ok(())
}

fn parse_secs(key: &str, raw: &str) -> Result<Duration> {
    raw.trim()
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|_| SessionError::Config(format!("{key} must be a whole number of seconds, got '{raw}'")))
}

/// Builder for SessionConfig
#[derive(Debug, Default)]
pub struct SessionConfigBuilder {
    idle_timeout: Option<Duration>,
    prompt_timeout: Option<Duration>,
    ack_window: Option<Duration>,
    inbox_capacity: Option<usize>,
    rejection_notice: Option<String>,
}

impl SessionConfigBuilder {
    pub fn idle_timeout(mut self, timeout: Duration) -> Self {
        self.idle_timeout = Some(timeout);
        self
    }

    pub fn prompt_timeout(mut self, timeout: Duration) -> Self {
        self.prompt_timeout = Some(timeout);
        self
    }

    pub fn ack_window(mut self, window: Duration) -> Self {
        self.ack_window = Some(window);
        self
    }

    pub fn inbox_capacity(mut self, capacity: usize) -> Self {
        self.inbox_capacity = Some(capacity);
        self
    }

    pub fn rejection_notice(mut self, notice: impl Into<String>) -> Self {
        self.rejection_notice = Some(notice.into());
        self
    }

    /// Build and validate the config
    pub fn build(self) -> Result<SessionConfig> {
        let defaults = SessionConfig::default();
        let config = SessionConfig {
            idle_timeout: self.idle_timeout.unwrap_or(defaults.idle_timeout),
            prompt_timeout: self.prompt_timeout.unwrap_or(defaults.prompt_timeout),
            ack_window: self.ack_window.unwrap_or(defaults.ack_window),
            inbox_capacity: self.inbox_capacity.unwrap_or(defaults.inbox_capacity),
            rejection_notice: self.rejection_notice.unwrap_or(defaults.rejection_notice),
        };
        config.validate()?;
        Ok(config)
    }
}
