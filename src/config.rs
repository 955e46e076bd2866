/// Service configuration loaded from environment variables.
#[derive(Debug)]
pub struct AppConfig {
    /// MongoDB connection URL.
    pub mongo_url: String,
    /// MongoDB database name.
    pub db_name: String,
    /// HMAC secret for signing JWT access tokens.
    pub jwt_secret: String,
    /// Comma-separated allowed CORS origins, or `*`. Env var: `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// TCP port to listen on (default 8001). Env var: `AULA_PORT`.
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            mongo_url: std::env::var("MONGO_URL").expect("MONGO_URL"),
            db_name: std::env::var("DB_NAME").expect("DB_NAME"),
            jwt_secret: std::env::var("JWT_SECRET").expect("JWT_SECRET"),
            cors_origins: std::env::var("CORS_ORIGINS")
                .unwrap_or_else(|_| "*".to_owned())
                .split(',')
                .map(|s| s.trim().to_owned())
                .filter(|s| !s.is_empty())
                .collect(),
            port: std::env::var("AULA_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8001),
        }
    }
}
