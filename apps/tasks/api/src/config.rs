use core_config::{AppInfo, FromEnv, app_info, server::ServerConfig};

pub use core_config::Environment;

/// Application-specific configuration
/// Composes shared config components from the `config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub server: ServerConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?; // Uses defaults: HOST=0.0.0.0, PORT=8080

        Ok(Self {
            app: app_info!(),
            server,
            environment,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_config_defaults() {
        temp_env::with_vars(
            [
                ("APP_ENV", None::<&str>),
                ("HOST", None),
                ("PORT", None),
                ("SHUTDOWN_TIMEOUT_SECS", None),
            ],
            || {
                let config = Config::from_env().unwrap();

                assert_eq!(config.app.name, "tasks_api");
                assert_eq!(config.environment, Environment::Development);
                assert_eq!(config.server.address(), "0.0.0.0:8080");
                assert_eq!(config.server.shutdown_timeout, Duration::from_secs(30));
            },
        );
    }

    #[test]
    fn test_config_from_env() {
        temp_env::with_vars(
            [
                ("APP_ENV", Some("production")),
                ("HOST", Some("127.0.0.1")),
                ("PORT", Some("5000")),
            ],
            || {
                let config = Config::from_env().unwrap();

                assert!(config.environment.is_production());
                assert_eq!(config.server.address(), "127.0.0.1:5000");
            },
        );
    }

    #[test]
    fn test_config_rejects_bad_port() {
        temp_env::with_var("PORT", Some("not-a-port"), || {
            assert!(Config::from_env().is_err());
        });
    }
}
