use anyhow::Context;
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: String,
    pub database_url: String,
    pub db_max_connections: u32,
    pub log_dir: String,

    // Presentation
    pub currency: String,
    pub page_title: String,
    pub organization: String,

    pub api_prefix: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_addr: "127.0.0.1:8501".to_string(),
            database_url: "sqlite:worker_management.db".to_string(),
            db_max_connections: 5,
            log_dir: "logs".to_string(),
            currency: "RM".to_string(),
            page_title: "AD HCare Worker Management".to_string(),
            organization: "AD HCARE".to_string(),
            api_prefix: "/api".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv().ok();

        let defaults = Self::default();

        Ok(Self {
            server_addr: env::var("SERVER_ADDR").unwrap_or(defaults.server_addr),
            database_url: env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            db_max_connections: parse_var("DB_MAX_CONNECTIONS", defaults.db_max_connections)?,
            log_dir: env::var("LOG_DIR").unwrap_or(defaults.log_dir),

            currency: env::var("CURRENCY").unwrap_or(defaults.currency),
            page_title: env::var("PAGE_TITLE").unwrap_or(defaults.page_title),
            organization: env::var("ORGANIZATION").unwrap_or(defaults.organization),

            api_prefix: env::var("API_PREFIX").unwrap_or(defaults.api_prefix),
        })
    }

    /// Formats an amount the way every page shows money, e.g. `RM 1500.00`.
    pub fn money(&self, amount: f64) -> String {
        format!("{} {:.2}", self.currency, amount)
    }
}

fn parse_var<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} must be a valid number, got {raw:?}")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_uses_currency_and_two_decimals() {
        let config = Config::default();
        assert_eq!(config.money(1500.0), "RM 1500.00");
        assert_eq!(config.money(-12.5), "RM -12.50");
    }

    #[test]
    fn missing_variable_falls_back_to_default() {
        let value: u32 = parse_var("WORKER_LEDGER_TEST_UNSET_VARIABLE", 7).unwrap();
        assert_eq!(value, 7);
    }
}
