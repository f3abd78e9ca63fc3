//! Client configuration

use std::time::Duration;

use url::Url;

use crate::{protocol::error::InvocationError, service::DEFAULT_NAMESPACE};

/// Default address of the kagent controller inside the cluster
pub const DEFAULT_BASE_URL: &str = "http://kagent-controller.kagent.svc.cluster.local:8083";

/// Default model name reported to the hosting application
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

/// Default upper bound on one invocation
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Configuration for an agent client
///
/// Built once at startup and handed to the builder; the client reads no
/// global state after that.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the agent host
    pub base_url: Url,

    /// Agent namespace used in the endpoint path
    pub namespace: String,

    /// Model name the surrounding application uses for its own completions
    pub default_model: String,

    /// Timeout applied when a call does not supply one
    pub default_timeout: Duration,
}

impl ClientConfig {
    /// Create a new client configuration with defaults for everything but the URL
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            namespace: DEFAULT_NAMESPACE.to_string(),
            default_model: DEFAULT_MODEL.to_string(),
            default_timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Parse a base URL and create a configuration for it
    pub fn parse(base_url: &str) -> Result<Self, InvocationError> {
        Url::parse(base_url)
            .map(Self::new)
            .map_err(|e| InvocationError::Config(format!("invalid base URL {base_url:?}: {e}")))
    }

    /// Load the configuration from the process environment
    ///
    /// Reads `KAGENT_API_URL`, `KAGENT_NAMESPACE`, `ANTHROPIC_MODEL` and
    /// `KAGENT_TIMEOUT_SECS`, falling back to the defaults.
    pub fn from_env() -> Result<Self, InvocationError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load the configuration from a key/value lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, InvocationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup("KAGENT_API_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let mut config = Self::parse(&base_url)?;

        if let Some(namespace) = lookup("KAGENT_NAMESPACE") {
            config.namespace = namespace;
        }

        if let Some(model) = lookup("ANTHROPIC_MODEL") {
            config.default_model = model;
        }

        if let Some(secs) = lookup("KAGENT_TIMEOUT_SECS") {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                InvocationError::Config(format!("KAGENT_TIMEOUT_SECS is not a number: {secs:?}"))
            })?;
            config.default_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Set the agent namespace
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Set the default model name
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    /// Set the default timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();

        assert_eq!(
            config.base_url.as_str(),
            "http://kagent-controller.kagent.svc.cluster.local:8083/"
        );
        assert_eq!(config.namespace, "kagent");
        assert_eq!(config.default_model, "claude-sonnet-4-20250514");
        assert_eq!(config.default_timeout, Duration::from_secs(300));
    }

    #[test]
    fn test_overrides() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("KAGENT_API_URL", "http://localhost:8083"),
            ("KAGENT_NAMESPACE", "team-a"),
            ("ANTHROPIC_MODEL", "claude-haiku"),
            ("KAGENT_TIMEOUT_SECS", "45"),
        ]))
        .unwrap();

        assert_eq!(config.base_url.as_str(), "http://localhost:8083/");
        assert_eq!(config.namespace, "team-a");
        assert_eq!(config.default_model, "claude-haiku");
        assert_eq!(config.default_timeout, Duration::from_secs(45));
    }

    #[test]
    fn test_invalid_url() {
        let result = ClientConfig::from_lookup(lookup(&[("KAGENT_API_URL", "not a url")]));

        assert!(matches!(result, Err(InvocationError::Config(_))));
    }

    #[test]
    fn test_invalid_timeout() {
        let result = ClientConfig::from_lookup(lookup(&[("KAGENT_TIMEOUT_SECS", "soon")]));

        assert!(matches!(result, Err(InvocationError::Config(_))));
    }
}
