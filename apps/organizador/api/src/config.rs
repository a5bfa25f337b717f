use core_config::{AppInfo, FromEnv, app_info, env_parse, server::ServerConfig};
use database::postgres::PostgresConfig;
use domain_tasks::TitleMatch;

pub use core_config::Environment;

/// Application-specific configuration
/// Composes shared config components from the `config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub database: PostgresConfig,
    pub server: ServerConfig,
    pub environment: Environment,
    /// Apply pending migrations before serving (`RUN_MIGRATIONS`, default true)
    pub run_migrations: bool,
    /// `TITLE_SEARCH_CASE_INSENSITIVE`, default false
    pub title_match: TitleMatch,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let database = PostgresConfig::from_env()?; // Required - will fail if not set
        let server = ServerConfig::from_env()?; // Uses defaults: HOST=0.0.0.0, PORT=8080
        let run_migrations = env_parse("RUN_MIGRATIONS", "true")?;
        let case_insensitive: bool = env_parse("TITLE_SEARCH_CASE_INSENSITIVE", "false")?;

        Ok(Self {
            app: app_info!(),
            database,
            server,
            environment,
            run_migrations,
            title_match: if case_insensitive {
                TitleMatch::CaseInsensitive
            } else {
                TitleMatch::CaseSensitive
            },
        })
    }
}
