use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

impl Config {
    /// Loads the configuration from the environment (a `.env` file is read
    /// first if present). Only `DATABASE_URL` is mandatory.
    pub fn from_env() -> Result<Self, String> {
        dotenvy::dotenv().ok();

        Ok(Config {
            database_url: env::var("DATABASE_URL")
                .map_err(|_| "DATABASE_URL must be set".to_string())?,
            max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .map_err(|_| "DATABASE_MAX_CONNECTIONS must be a number".to_string())?,
            acquire_timeout_secs: env::var("DATABASE_ACQUIRE_TIMEOUT_SECS")
                .unwrap_or_else(|_| "3".to_string())
                .parse()
                .map_err(|_| "DATABASE_ACQUIRE_TIMEOUT_SECS must be a number".to_string())?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_settings_fall_back_to_defaults() {
        // Touch only variables no other test reads.
        unsafe {
            env::remove_var("DATABASE_MAX_CONNECTIONS");
            env::remove_var("DATABASE_ACQUIRE_TIMEOUT_SECS");
            env::set_var("DATABASE_URL", "postgresql://localhost/autodealer_test");
        }

        let config = Config::from_env().unwrap();
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.acquire_timeout_secs, 3);
    }
}
