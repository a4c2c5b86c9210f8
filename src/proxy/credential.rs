// UptimeRobot API key lookup
use crate::modules::env::ReadEnv;

/// Source of the upstream API key, consulted on every request.
pub trait CredentialProvider: Send + Sync {
    /// `None` when the key is not configured.
    fn api_key(&self) -> Option<String>;
}

/// Reads the key from an environment variable at call time, so a rotated
/// key is picked up without restarting.
pub struct EnvCredential<E> {
    env: E,
    var_name: String,
}

impl<E: ReadEnv> EnvCredential<E> {
    pub fn new(env: E, var_name: impl Into<String>) -> Self {
        Self {
            env,
            var_name: var_name.into(),
        }
    }

    pub fn var_name(&self) -> &str {
        &self.var_name
    }
}

impl<E: ReadEnv> CredentialProvider for EnvCredential<E> {
    fn api_key(&self) -> Option<String> {
        self.env
            .var(&self.var_name)
            .ok()
            .filter(|key| !key.is_empty())
    }
}

// Keys must never reach the logs through a derived Debug.
impl<E> std::fmt::Debug for EnvCredential<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnvCredential")
            .field("var_name", &self.var_name)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::env::InMemoryEnv;

    #[test]
    fn test_reads_key_at_call_time() {
        let credential = EnvCredential::new(InMemoryEnv::new(), "UPTIMEROBOT_API_KEY");
        assert_eq!(credential.api_key(), None);

        credential.env.set("UPTIMEROBOT_API_KEY", "ur123-abc");
        assert_eq!(credential.api_key().as_deref(), Some("ur123-abc"));
    }

    #[test]
    fn test_empty_key_counts_as_missing() {
        let env = InMemoryEnv::new();
        env.set("UPTIMEROBOT_API_KEY", "");
        let credential = EnvCredential::new(env, "UPTIMEROBOT_API_KEY");
        assert_eq!(credential.api_key(), None);
    }

    #[test]
    fn test_debug_output_hides_key() {
        let env = InMemoryEnv::new();
        env.set("UPTIMEROBOT_API_KEY", "ur123-secret");
        let credential = EnvCredential::new(env, "UPTIMEROBOT_API_KEY");

        let debug = format!("{:?}", credential);
        assert!(debug.contains("UPTIMEROBOT_API_KEY"));
        assert!(!debug.contains("ur123-secret"));
    }
}
