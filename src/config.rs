pub mod env_var {
    use derive_more::Display;
    use tracing::Level;

    #[derive(Debug, Clone)]
    pub struct EnvVar {
        pub host: String,
        pub port: u16,
        pub log_level: Level,
        /// `None` keeps users in memory.
        pub database: Option<DatabaseEnv>,
    }

    impl EnvVar {
        pub fn address(&self) -> String {
            format!("{}:{}", self.host, self.port)
        }
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct DatabaseEnv {
        pub host: String,
        pub port: u16,
        pub name: String,
        pub user: String,
        pub password: String,
    }

    impl DatabaseEnv {
        pub fn url(&self) -> String {
            let DatabaseEnv {
                host,
                port,
                name,
                user,
                password,
            } = self;
            format!("postgres://{user}:{password}@{host}:{port}/{name}")
        }
    }

    #[derive(Debug, Display, Clone, PartialEq, Eq)]
    pub enum ConfigError {
        #[display(fmt = "Missing env var {_0}")]
        Missing(&'static str),
        #[display(fmt = "Invalid {var}: {value:?}")]
        Invalid { var: &'static str, value: String },
    }

    impl std::error::Error for ConfigError {}

    const DEFAULT_HOST: &str = "0.0.0.0";
    const DEFAULT_PORT: u16 = 8080;

    macro_rules! get_env {
        ($lookup:ident, $env:literal) => {
            $lookup($env).ok_or(ConfigError::Missing($env))?
        };
    }

    macro_rules! parse_env {
        ($value:expr, $env:literal) => {{
            let value = $value;
            value.parse().map_err(|_| ConfigError::Invalid {
                var: $env,
                value: value.clone(),
            })?
        }};
    }

    /// Reads configuration from the process environment.
    pub fn load() -> Result<EnvVar, ConfigError> {
        from_lookup(|var| std::env::var(var).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<EnvVar, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.into());
        let port = match lookup("PORT") {
            Some(port) => parse_env!(port, "PORT"),
            None => DEFAULT_PORT,
        };
        let log_level = match lookup("LOG_LEVEL") {
            Some(level) => parse_env!(level, "LOG_LEVEL"),
            None => Level::INFO,
        };

        let database = match lookup("DATABASE_HOST") {
            Some(host) => Some(DatabaseEnv {
                host,
                port: parse_env!(get_env!(lookup, "DATABASE_PORT"), "DATABASE_PORT"),
                name: get_env!(lookup, "DATABASE_NAME"),
                user: get_env!(lookup, "DATABASE_USER"),
                password: get_env!(lookup, "DATABASE_PASSWORD"),
            }),
            None => None,
        };

        Ok(EnvVar {
            host,
            port,
            log_level,
            database,
        })
    }

    #[cfg(test)]
    mod tests {
        use std::collections::HashMap;

        use pretty_assertions::assert_eq;

        use super::*;

        fn lookup(vars: &[(&'static str, &str)]) -> impl Fn(&'static str) -> Option<String> {
            let vars: HashMap<_, _> = vars
                .iter()
                .map(|(key, value)| (*key, value.to_string()))
                .collect();
            move |var| vars.get(var).cloned()
        }

        #[test]
        fn defaults_to_in_memory_storage() {
            let env = from_lookup(lookup(&[])).unwrap();

            assert_eq!(env.address(), "0.0.0.0:8080");
            assert_eq!(env.log_level, Level::INFO);
            assert_eq!(env.database, None);
        }

        #[test]
        fn reads_database_settings() {
            let env = from_lookup(lookup(&[
                ("PORT", "3000"),
                ("LOG_LEVEL", "debug"),
                ("DATABASE_HOST", "db"),
                ("DATABASE_PORT", "5432"),
                ("DATABASE_NAME", "users"),
                ("DATABASE_USER", "app"),
                ("DATABASE_PASSWORD", "secret"),
            ]))
            .unwrap();

            assert_eq!(env.port, 3000);
            assert_eq!(env.log_level, Level::DEBUG);
            assert_eq!(
                env.database.map(|db| db.url()),
                Some("postgres://app:secret@db:5432/users".to_string())
            );
        }

        #[test]
        fn database_host_requires_the_remaining_settings() {
            let err = from_lookup(lookup(&[
                ("DATABASE_HOST", "db"),
                ("DATABASE_PORT", "5432"),
            ]))
            .unwrap_err();

            assert_eq!(err, ConfigError::Missing("DATABASE_NAME"));
        }

        #[test]
        fn rejects_invalid_port() {
            let err = from_lookup(lookup(&[("PORT", "http")])).unwrap_err();

            assert_eq!(
                err,
                ConfigError::Invalid {
                    var: "PORT",
                    value: "http".into()
                }
            );
        }
    }
}
