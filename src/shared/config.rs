use std::env;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub run_migrations: bool,
}

impl ServerConfig {
    /// Load server configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_source(|key| env::var(key).ok())
    }

    fn from_source<F>(get: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = get("HOST").expect("HOST is not set in .env file");
        let port = get("PORT")
            .expect("PORT is not set in .env file")
            .parse::<u16>()
            .unwrap_or_else(|_| panic!("Invalid PORT value"));
        let database_url = get("DATABASE_URL").expect("DATABASE_URL is not set in .env file");

        let parse_u32 = |key: &str, default: u32| -> u32 {
            get(key)
                .map(|v| {
                    v.parse::<u32>()
                        .unwrap_or_else(|_| panic!("Invalid {} value", key))
                })
                .unwrap_or(default)
        };

        let db_max_connections = parse_u32("DB_MAX_CONNECTIONS", 20);
        let db_min_connections = parse_u32("DB_MIN_CONNECTIONS", 2);
        if db_min_connections > db_max_connections {
            panic!("DB_MIN_CONNECTIONS must not exceed DB_MAX_CONNECTIONS");
        }

        let run_migrations = get("RUN_MIGRATIONS")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Self {
            host,
            port,
            database_url,
            db_max_connections,
            db_min_connections,
            run_migrations,
        }
    }

    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
