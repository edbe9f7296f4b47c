//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Bill data source configuration.
    #[serde(default)]
    pub data: DataConfig,
    /// Company details printed on statements.
    #[serde(default)]
    pub company: CompanyConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Bill data source configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DataConfig {
    /// Path to a JSON file holding the bill records. Starts empty when unset.
    pub bills_path: Option<String>,
}

/// Company details printed on statement headers.
#[derive(Debug, Clone, Deserialize)]
pub struct CompanyConfig {
    /// Company name.
    #[serde(default = "default_company_name")]
    pub name: String,
    /// Reporting currency code.
    #[serde(default = "default_currency")]
    pub currency: String,
}

impl Default for CompanyConfig {
    fn default() -> Self {
        Self {
            name: default_company_name(),
            currency: default_currency(),
        }
    }
}

fn default_company_name() -> String {
    "ABC Company".to_string()
}

fn default_currency() -> String {
    "NPR".to_string()
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("NEPFIN").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
