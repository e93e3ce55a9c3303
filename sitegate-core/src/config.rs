//! # Configuration
//!
//! A string key/value store, in the same `set()` / `get()` style DogRS apps
//! use, plus a typed view ([`ResolverOptions`]) of the keys the resolver
//! reads.
//!
//! ```rust
//! use sitegate_core::{ResolverConfig, ResolverOptions};
//!
//! let mut config = ResolverConfig::new();
//! config.set("resolver.trust_forwarded_host", "false");
//!
//! let options = ResolverOptions::from_snapshot(&config.snapshot());
//! assert!(!options.trust_forwarded_host);
//! assert!(options.domain_resolution);
//! ```
//!
//! ## Environment overrides
//! `load_env("SITEGATE__")` maps `SITEGATE__RESOLVER__DOMAIN_RESOLUTION=false`
//! to `resolver.domain_resolution = "false"`.

use std::collections::HashMap;

pub const TRUST_FORWARDED_HOST: &str = "resolver.trust_forwarded_host";
pub const DOMAIN_RESOLUTION: &str = "resolver.domain_resolution";

#[derive(Debug, Default)]
pub struct ResolverConfig {
    values: HashMap<String, String>,
}

impl ResolverConfig {
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    pub fn set<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(|s| s.as_str())
    }

    pub fn has(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Import every environment variable starting with `prefix`.
    pub fn load_env(&mut self, prefix: &str) {
        self.load_vars(prefix, std::env::vars());
    }

    fn load_vars<I>(&mut self, prefix: &str, vars: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (key, value) in vars {
            if let Some(stripped) = key.strip_prefix(prefix) {
                let normalized = stripped.to_lowercase().replace("__", ".");
                self.set(normalized, value);
            }
        }
    }

    pub fn snapshot(&self) -> ConfigSnapshot {
        ConfigSnapshot {
            map: self.values.clone(),
        }
    }
}

/// Immutable copy of the config taken at startup.
#[derive(Debug, Clone, Default)]
pub struct ConfigSnapshot {
    map: HashMap<String, String>,
}

impl ConfigSnapshot {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.map.get(key).map(|s| s.as_str())
    }

    pub fn get_string(&self, key: &str) -> Option<String> {
        self.map.get(key).cloned()
    }

    pub fn get_u16(&self, key: &str) -> Option<u16> {
        self.get(key).and_then(|v| v.parse::<u16>().ok())
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(|v| v.parse::<bool>().ok())
    }
}

/// Typed resolver settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverOptions {
    /// Read `X-Forwarded-Host` before `Host`.
    pub trust_forwarded_host: bool,
    /// Allow the custom-domain branch at all.
    pub domain_resolution: bool,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            trust_forwarded_host: true,
            domain_resolution: true,
        }
    }
}

impl ResolverOptions {
    /// Missing or unparsable keys keep their defaults.
    pub fn from_snapshot(snapshot: &ConfigSnapshot) -> Self {
        let defaults = Self::default();
        Self {
            trust_forwarded_host: snapshot
                .get_bool(TRUST_FORWARDED_HOST)
                .unwrap_or(defaults.trust_forwarded_host),
            domain_resolution: snapshot
                .get_bool(DOMAIN_RESOLUTION)
                .unwrap_or(defaults.domain_resolution),
        }
    }
}
