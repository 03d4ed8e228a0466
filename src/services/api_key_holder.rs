use secrecy::SecretString;
use tokio::sync::RwLock;

use crate::config::Environment;

/// Resolves the model provider API key.
///
/// In development an in-memory override set through the dev endpoint takes
/// precedence over the environment key. Outside development the override is
/// never written or read.
pub struct ApiKeyHolder {
    environment: Environment,
    env_key: Option<SecretString>,
    dev_key: RwLock<Option<SecretString>>,
}

impl ApiKeyHolder {
    pub fn new(environment: Environment, env_key: Option<SecretString>) -> Self {
        Self {
            environment,
            env_key,
            dev_key: RwLock::new(None),
        }
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    /// Sets or clears the developer key. An empty key clears it.
    /// Returns `false` when ignored.
    pub async fn set_developer_api_key(&self, key: Option<String>) -> bool {
        if !self.environment.is_development() {
            log::warn!(
                "Attempted to set developer API key outside of development environment. Action ignored."
            );
            return false;
        }

        let mut dev_key = self.dev_key.write().await;
        *dev_key = key.filter(|k| !k.is_empty()).map(SecretString::from);
        if dev_key.is_some() {
            log::info!("Developer API key has been set in memory for this session.");
        } else {
            log::info!("Developer API key has been cleared from memory for this session.");
        }
        true
    }

    pub async fn resolve(&self) -> Option<SecretString> {
        if self.environment.is_development() {
            if let Some(key) = self.dev_key.read().await.as_ref() {
                return Some(key.clone());
            }
        }
        self.env_key.clone()
    }
}
