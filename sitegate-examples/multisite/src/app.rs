use sitegate_core::ResolverConfig;

pub const ENV_PREFIX: &str = "SITEGATE__";

/// Defaults first, then `SITEGATE__*` environment overrides.
pub fn load_config() -> ResolverConfig {
    let mut config = ResolverConfig::new();
    config.set("http.host", "127.0.0.1");
    config.set("http.port", "3036");
    config.set("resolver.trust_forwarded_host", "true");
    config.set("resolver.domain_resolution", "true");
    config.load_env(ENV_PREFIX);
    config
}
