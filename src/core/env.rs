// src/core/env.rs

use crate::core::string_utils::{ConvertError, ParseValue};
use lazy_static::lazy_static;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Mutex, PoisonError};

lazy_static! {
    static ref GLOBAL_ENV: Env = Env::new();
}

/// Where an [`Env`] reads raw variable values from.
pub trait VarSource: Send + Sync {
    /// Returns the value of `name`, or `None` if it is not set.
    fn var(&self, name: &str) -> Option<String>;
}

/// Reads from the environment of the current process.
/// Variables that are not valid Unicode are treated as unset.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl VarSource for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var_os(name).and_then(|value| value.into_string().ok())
    }
}

impl<F> VarSource for F
where
    F: Fn(&str) -> Option<String> + Send + Sync,
{
    fn var(&self, name: &str) -> Option<String> {
        self(name)
    }
}

/// Cached, typed access to environment variables.
///
/// Every lookup name is prefixed with the accessor's prefix. The raw value of
/// a name is read from the source the first time it is requested and then
/// served from the cache for the lifetime of the accessor, even if the
/// underlying environment changes.
pub struct Env {
    prefix: String,
    source: Box<dyn VarSource>,
    cache: Mutex<HashMap<String, Option<String>>>,
}

impl fmt::Debug for Env {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Env")
            .field("prefix", &self.prefix)
            .field("cached", &self.lock_cache().len())
            .finish()
    }
}

impl Default for Env {
    fn default() -> Self {
        Self::new()
    }
}

impl Env {
    /// An accessor for the process environment without a prefix.
    pub fn new() -> Self {
        Self::with_prefix("")
    }

    /// An accessor for the process environment that prepends `prefix` to every name.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self::with_source(prefix, ProcessEnv)
    }

    /// An accessor reading from a custom source.
    pub fn with_source(prefix: impl Into<String>, source: impl VarSource + 'static) -> Self {
        Self {
            prefix: prefix.into(),
            source: Box::new(source),
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// The process-wide accessor (no prefix).
    pub fn global() -> &'static Self {
        &GLOBAL_ENV
    }

    /// The prefix put in front of every looked-up name.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns the raw value of `<prefix><name>`, reading the source only on the first call.
    pub fn raw(&self, name: &str) -> Option<String> {
        let full_name = format!("{}{}", self.prefix, name);
        let mut cache = self.lock_cache();

        if let Some(cached) = cache.get(&full_name) {
            return cached.clone();
        }

        let value = self.source.var(&full_name);
        log::trace!("Environment cache miss for '{}' (set: {})", full_name, value.is_some());
        cache.insert(full_name, value.clone());
        value
    }

    /// Returns the parsed value, or `None` if the variable is not set.
    ///
    /// # Errors
    /// Returns a [`ConvertError`] if the variable is set but cannot be parsed as `T`.
    pub fn get_optional<T: ParseValue>(&self, name: &str) -> Result<Option<T>, ConvertError> {
        self.raw(name).map(|value| T::parse_value(&value)).transpose()
    }

    /// Returns the parsed value, or `default` if the variable is not set.
    ///
    /// A value that cannot be parsed is reported with a warning and replaced by `default`.
    pub fn get<T: ParseValue>(&self, name: &str, default: T) -> T {
        match self.get_optional(name) {
            Ok(Some(value)) => value,
            Ok(None) => default,
            Err(e) => {
                log::warn!("Ignoring environment variable {}{}: {}", self.prefix, name, e);
                default
            }
        }
    }

    fn lock_cache(&self) -> std::sync::MutexGuard<'_, HashMap<String, Option<String>>> {
        // The cache holds plain values, a poisoned lock leaves it consistent.
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    /// A mutable variable table standing in for the process environment.
    fn fake_env(vars: &[(&str, &str)]) -> Arc<Mutex<HashMap<String, String>>> {
        Arc::new(Mutex::new(
            vars.iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        ))
    }

    fn env_over(prefix: &str, table: &Arc<Mutex<HashMap<String, String>>>) -> Env {
        let table = Arc::clone(table);
        Env::with_source(prefix, move |name: &str| table.lock().unwrap().get(name).cloned())
    }

    #[test]
    fn test_get() {
        let table = fake_env(&[("UTILS_INT", "42"), ("UTILS_BOOL", "1")]);
        let env = env_over("", &table);

        assert_eq!(env.get::<i32>("UTILS_INT", 0), 42);
        assert_eq!(env.get::<i32>("UTILS_INT2", 3), 3);
        assert!(env.get::<bool>("UTILS_BOOL", false));
        assert_eq!(env.get::<String>("MISSING", "fallback".to_string()), "fallback");
    }

    #[test]
    fn test_get_optional() {
        let table = fake_env(&[("COUNT", "7"), ("BROKEN", "seven")]);
        let env = env_over("", &table);

        assert_eq!(env.get_optional::<u32>("COUNT"), Ok(Some(7)));
        assert_eq!(env.get_optional::<u32>("NOPE"), Ok(None));
        assert!(env.get_optional::<u32>("BROKEN").is_err());
        // The defaulting getter never fails.
        assert_eq!(env.get::<u32>("BROKEN", 5), 5);
    }

    #[test]
    fn test_values_are_cached() {
        let table = fake_env(&[("UTILS_CACHED", "first")]);
        let env = env_over("", &table);

        assert_eq!(env.get::<String>("UTILS_CACHED", String::new()), "first");

        table
            .lock()
            .unwrap()
            .insert("UTILS_CACHED".to_string(), "second".to_string());
        assert_eq!(env.get::<String>("UTILS_CACHED", String::new()), "first");

        // A fresh accessor has its own cache and sees the new value.
        let fresh = env_over("", &table);
        assert_eq!(fresh.get::<String>("UTILS_CACHED", String::new()), "second");
    }

    #[test]
    fn test_absence_is_cached() {
        let table = fake_env(&[]);
        let env = env_over("", &table);

        assert_eq!(env.raw("LATE"), None);
        table
            .lock()
            .unwrap()
            .insert("LATE".to_string(), "now".to_string());
        assert_eq!(env.raw("LATE"), None);
    }

    #[test]
    fn test_prefix_scopes_are_independent() {
        let table = fake_env(&[("APP_MODE", "fast"), ("LIB_MODE", "slow")]);
        let app = env_over("APP_", &table);
        let lib = env_over("LIB_", &table);

        assert_eq!(app.prefix(), "APP_");
        assert_eq!(app.get::<String>("MODE", String::new()), "fast");
        assert_eq!(lib.get::<String>("MODE", String::new()), "slow");
    }

    #[test]
    fn test_process_env_reads_path() {
        // PATH is set in every test environment we run in.
        let env = Env::new();
        assert_eq!(env.raw("PATH"), std::env::var("PATH").ok());
    }
}
