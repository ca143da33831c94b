use std::env;

/// Process configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    /// Shared secret for the admin surface. Empty means the admin routes
    /// reject every request.
    pub admin_api_key: String,
}

impl Config {
    pub fn from_env() -> Self {
        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| {
            log::info!("No BIND_ADDR set, defaulting to 127.0.0.1:8080");
            "127.0.0.1:8080".to_string()
        });

        // Admin key from ADMIN_API_KEY env var; too-short keys are refused
        // rather than silently accepted.
        let admin_api_key = match env::var("ADMIN_API_KEY") {
            Ok(val) if val.len() >= 16 => val,
            Ok(val) => {
                log::warn!(
                    "ADMIN_API_KEY too short ({} chars, need 16+) — admin surface disabled",
                    val.len()
                );
                String::new()
            }
            Err(_) => {
                log::warn!("No ADMIN_API_KEY set — admin surface disabled");
                String::new()
            }
        };

        Self {
            database_url,
            bind_addr,
            admin_api_key,
        }
    }
}
