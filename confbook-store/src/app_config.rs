use config::builder::DefaultState;
use config::ConfigBuilder;
use serde::Deserialize;
use std::env;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub conference: ConferenceConfig,
    pub database: DatabaseConfig,
    pub confirmation: ConfirmationConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ConferenceConfig {
    pub name: String,
    pub total_tickets: u32,
    /// Start from what the store already holds instead of full capacity
    #[serde(default)]
    pub restore_inventory: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ConfirmationConfig {
    pub delay_ms: u64,
}

impl ConfirmationConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::builder("config", Self::environment())?
            .build()?
            .try_deserialize()
    }

    /// Eg.. `CONFBOOK_CONFERENCE__TOTAL_TICKETS=100`
    fn environment() -> config::Environment {
        config::Environment::with_prefix("CONFBOOK")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    fn builder(
        config_dir: &str,
        environment: config::Environment,
    ) -> Result<ConfigBuilder<DefaultState>, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let builder = config::Config::builder()
            .set_default("conference.name", "Go Conference")?
            .set_default("conference.total_tickets", 50_i64)?
            .set_default("conference.restore_inventory", false)?
            .set_default("database.url", "sqlite://conference.db")?
            .set_default("confirmation.delay_ms", 5000_i64)?
            // Every file layer is optional so the binary runs from any directory
            .add_source(config::File::with_name(&format!("{}/default", config_dir)).required(false))
            .add_source(config::File::with_name(&format!("{}/{}", config_dir, run_mode)).required(false))
            // Local overrides, not checked in
            .add_source(config::File::with_name(&format!("{}/local", config_dir)).required(false))
            .add_source(environment);

        Ok(builder)
    }
}
