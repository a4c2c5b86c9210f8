//! Environment variable access behind a trait, so configuration and the
//! credential lookup can run against a fake environment in tests.

use std::env;

/// Read-only view of process-wide configuration.
///
/// `Send + Sync` because the credential provider holding it is shared by
/// every request task.
pub trait ReadEnv: Send + Sync {
    fn var(&self, key: &str) -> Result<String, env::VarError>;
}

/// Zero-sized type, delegates to `std::env`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnv;

impl ReadEnv for SystemEnv {
    #[inline]
    fn var(&self, key: &str) -> Result<String, env::VarError> {
        env::var(key)
    }
}

/// Won't touch the global process environment.
#[cfg(test)]
pub struct InMemoryEnv {
    vars: std::sync::RwLock<std::collections::HashMap<String, String>>,
}

#[cfg(test)]
impl InMemoryEnv {
    pub fn new() -> Self {
        Self {
            vars: std::sync::RwLock::new(std::collections::HashMap::new()),
        }
    }

    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        self.vars
            .write()
            .unwrap()
            .insert(key.into(), value.into());
    }

    pub fn remove(&self, key: &str) {
        self.vars.write().unwrap().remove(key);
    }
}

#[cfg(test)]
impl ReadEnv for InMemoryEnv {
    fn var(&self, key: &str) -> Result<String, env::VarError> {
        self.vars
            .read()
            .unwrap()
            .get(key)
            .cloned()
            .ok_or(env::VarError::NotPresent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_env_delegation() {
        let std_result = std::env::var("PATH");
        let provider_result = SystemEnv.var("PATH");
        assert_eq!(std_result.is_ok(), provider_result.is_ok());
    }

    #[test]
    fn test_in_memory_env_set_get_remove() {
        let env = InMemoryEnv::new();
        env.set("UPTIMEROBOT_API_KEY", "ur-test");
        assert_eq!(env.var("UPTIMEROBOT_API_KEY").unwrap(), "ur-test");

        env.remove("UPTIMEROBOT_API_KEY");
        assert!(matches!(
            env.var("UPTIMEROBOT_API_KEY"),
            Err(env::VarError::NotPresent)
        ));
    }
}
