use crate::app_config::{AppConfig, Environment, ShopCredentials};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid or half of a required pair is
/// missing.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for
/// testing or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid or half of a required pair is
/// missing.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual
/// environment so it can be tested with a pure `HashMap` lookup — no
/// `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let env = parse_environment(&or_default("SHOPKEEPER_ENV", "development"));
    let bind_addr = parse_addr("SHOPKEEPER_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("SHOPKEEPER_LOG_LEVEL", "info");

    let shop = build_shop_credentials(
        lookup("SHOPKEEPER_SHOP_DOMAIN").ok(),
        lookup("SHOPKEEPER_ADMIN_TOKEN").ok(),
    )?;
    let api_version = or_default("SHOPKEEPER_API_VERSION", "2024-01");
    let control_secret = lookup("SHOPKEEPER_CONTROL_SECRET")
        .ok()
        .filter(|s| !s.trim().is_empty());

    let default_vendor = or_default("SHOPKEEPER_DEFAULT_VENDOR", "House Brand");

    let page_size = parse_u32("SHOPKEEPER_PAGE_SIZE", "250")?;
    if page_size == 0 || page_size > 250 {
        return Err(ConfigError::InvalidEnvVar {
            var: "SHOPKEEPER_PAGE_SIZE".to_string(),
            reason: format!("must be between 1 and 250, got {page_size}"),
        });
    }

    let request_timeout_secs = parse_u64("SHOPKEEPER_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default(
        "SHOPKEEPER_USER_AGENT",
        "shopkeeper/0.1 (catalog-maintenance)",
    );
    let write_concurrency = parse_usize("SHOPKEEPER_WRITE_CONCURRENCY", "1")?;
    if write_concurrency == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "SHOPKEEPER_WRITE_CONCURRENCY".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        shop,
        api_version,
        control_secret,
        default_vendor,
        page_size,
        request_timeout_secs,
        user_agent,
        write_concurrency,
    })
}

/// Pair up the shop domain and admin token.
///
/// Both absent is a valid "not configured" state. Exactly one present is a
/// configuration mistake and fails loudly.
fn build_shop_credentials(
    domain: Option<String>,
    token: Option<String>,
) -> Result<Option<ShopCredentials>, ConfigError> {
    let domain = domain.filter(|s| !s.trim().is_empty());
    let token = token.filter(|s| !s.trim().is_empty());

    match (domain, token) {
        (Some(shop_domain), Some(admin_token)) => Ok(Some(ShopCredentials {
            shop_domain,
            admin_token,
        })),
        (None, None) => Ok(None),
        (Some(_), None) => Err(ConfigError::MissingEnvVar(
            "SHOPKEEPER_ADMIN_TOKEN".to_string(),
        )),
        (None, Some(_)) => Err(ConfigError::MissingEnvVar(
            "SHOPKEEPER_SHOP_DOMAIN".to_string(),
        )),
    }
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    /// Returns a map with a fully configured shop and secret.
    fn full_env<'a>() -> HashMap<&'a str, &'a str> {
        let mut m = HashMap::new();
        m.insert("SHOPKEEPER_SHOP_DOMAIN", "example.myshopify.com");
        m.insert("SHOPKEEPER_ADMIN_TOKEN", "shpat_test");
        m.insert("SHOPKEEPER_CONTROL_SECRET", "hunter2");
        m
    }

    #[test]
    fn parse_environment_production() {
        assert_eq!(parse_environment("production"), Environment::Production);
    }

    #[test]
    fn parse_environment_unknown_defaults_to_development() {
        assert_eq!(parse_environment("staging"), Environment::Development);
    }

    #[test]
    fn empty_env_is_valid_but_unconfigured() {
        let map: HashMap<&str, &str> = HashMap::new();
        let cfg = build_app_config(lookup_from_map(&map)).expect("empty env should load");
        assert!(cfg.shop.is_none());
        assert!(cfg.control_secret.is_none());
    }

    #[test]
    fn full_env_loads_credentials_and_defaults() {
        let map = full_env();
        let cfg = build_app_config(lookup_from_map(&map)).expect("full env should load");
        let shop = cfg.shop.expect("shop credentials");
        assert_eq!(shop.shop_domain, "example.myshopify.com");
        assert_eq!(shop.admin_token, "shpat_test");
        assert_eq!(cfg.control_secret.as_deref(), Some("hunter2"));
        assert_eq!(cfg.env, Environment::Development);
        assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:3000");
        assert_eq!(cfg.api_version, "2024-01");
        assert_eq!(cfg.default_vendor, "House Brand");
        assert_eq!(cfg.page_size, 250);
        assert_eq!(cfg.request_timeout_secs, 30);
        assert_eq!(cfg.user_agent, "shopkeeper/0.1 (catalog-maintenance)");
        assert_eq!(cfg.write_concurrency, 1);
    }

    #[test]
    fn domain_without_token_fails() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("SHOPKEEPER_SHOP_DOMAIN", "example.myshopify.com");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "SHOPKEEPER_ADMIN_TOKEN"),
            "expected MissingEnvVar(SHOPKEEPER_ADMIN_TOKEN), got: {result:?}"
        );
    }

    #[test]
    fn token_without_domain_fails() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("SHOPKEEPER_ADMIN_TOKEN", "shpat_test");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "SHOPKEEPER_SHOP_DOMAIN"),
            "expected MissingEnvVar(SHOPKEEPER_SHOP_DOMAIN), got: {result:?}"
        );
    }

    #[test]
    fn blank_secret_counts_as_unset() {
        let mut map = full_env();
        map.insert("SHOPKEEPER_CONTROL_SECRET", "   ");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert!(cfg.control_secret.is_none());
    }

    #[test]
    fn invalid_bind_addr_fails() {
        let mut map = full_env();
        map.insert("SHOPKEEPER_BIND_ADDR", "not-a-socket-addr");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SHOPKEEPER_BIND_ADDR"),
            "expected InvalidEnvVar(SHOPKEEPER_BIND_ADDR), got: {result:?}"
        );
    }

    #[test]
    fn page_size_override() {
        let mut map = full_env();
        map.insert("SHOPKEEPER_PAGE_SIZE", "50");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.page_size, 50);
    }

    #[test]
    fn page_size_zero_fails() {
        let mut map = full_env();
        map.insert("SHOPKEEPER_PAGE_SIZE", "0");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SHOPKEEPER_PAGE_SIZE"),
            "expected InvalidEnvVar(SHOPKEEPER_PAGE_SIZE), got: {result:?}"
        );
    }

    #[test]
    fn page_size_above_store_maximum_fails() {
        let mut map = full_env();
        map.insert("SHOPKEEPER_PAGE_SIZE", "500");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SHOPKEEPER_PAGE_SIZE"),
            "expected InvalidEnvVar(SHOPKEEPER_PAGE_SIZE), got: {result:?}"
        );
    }

    #[test]
    fn write_concurrency_override() {
        let mut map = full_env();
        map.insert("SHOPKEEPER_WRITE_CONCURRENCY", "4");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.write_concurrency, 4);
    }

    #[test]
    fn write_concurrency_zero_fails() {
        let mut map = full_env();
        map.insert("SHOPKEEPER_WRITE_CONCURRENCY", "0");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SHOPKEEPER_WRITE_CONCURRENCY"),
            "expected InvalidEnvVar(SHOPKEEPER_WRITE_CONCURRENCY), got: {result:?}"
        );
    }

    #[test]
    fn write_concurrency_not_a_number_fails() {
        let mut map = full_env();
        map.insert("SHOPKEEPER_WRITE_CONCURRENCY", "many");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SHOPKEEPER_WRITE_CONCURRENCY"),
            "expected InvalidEnvVar(SHOPKEEPER_WRITE_CONCURRENCY), got: {result:?}"
        );
    }

    #[test]
    fn default_vendor_override() {
        let mut map = full_env();
        map.insert("SHOPKEEPER_DEFAULT_VENDOR", "Acme Goods");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.default_vendor, "Acme Goods");
    }
}
