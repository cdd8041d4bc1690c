use clap::Parser;
use once_cell::sync::Lazy;

/// Session token lifetime.
pub const JWT_EXPIRED_TIME: i64 = 86400i64;

// Password-reset lockout
pub const OTP_MAX_FAIL_ATTEMPTS: u32 = 5;
pub const OTP_LOCK_DURATION_SECONDS: u64 = 900; // 15 minutes

/// Reset tokens carry 24 random alphanumeric characters (~142 bits).
pub const RESET_TOKEN_LENGTH: usize = 24;

/// Completion percentages are cached for an hour before being recomputed.
pub const COMPLETION_CACHE_TTL_SECONDS: u64 = 3600;

pub static APP_CONFIG: Lazy<Config> = Lazy::new(Config::parse);

#[derive(Debug, Parser, Clone)]
pub struct Config {
    #[clap(long, env, default_value_t = 8080)]
    pub port: u16,

    #[clap(long, env, default_value_t = false)]
    pub debug: bool,

    #[clap(long, env, default_value_t = true)]
    pub swagger_enabled: bool,

    #[clap(long, env, default_value = "info")]
    pub log_level: String,

    /// Required: signs session tokens.
    #[clap(long, env)]
    pub secret_key: String,

    #[clap(long, env, default_value = "localhost,127.0.0.1")]
    pub allowed_hosts: String,

    #[clap(long, env, default_value = "*")]
    pub cors_allowed_origins: String,

    #[clap(long, env)]
    pub database_url: String,

    #[clap(long, env, default_value_t = 30)]
    pub database_timeout_seconds: u64,

    // cache
    #[clap(long, env, default_value_t = false)]
    pub use_redis: bool,

    #[clap(long, env, default_value = "redis://127.0.0.1:6379")]
    pub redis_url: String,

    #[clap(long, env, default_value = "institute")]
    pub redis_key_prefix: String,

    #[clap(long, env, default_value_t = 300)]
    pub cache_timeout_seconds: u64,

    #[clap(long, env, default_value_t = 8)]
    pub cache_max_connections: u32,

    // email (opaque transport; console backend logs instead of sending)
    #[clap(long, env, default_value = "console")]
    pub email_backend: String,

    #[clap(long, env, default_value = "noreply@institute.local")]
    pub email_from: String,

    #[clap(long, env, default_value = "")]
    pub email_host: String,

    #[clap(long, env, default_value_t = 587)]
    pub email_port: u16,

    #[clap(long, env, default_value = "")]
    pub email_username: String,

    #[clap(long, env, default_value = "")]
    pub email_password: String,

    #[clap(long, env, default_value_t = true)]
    pub email_use_tls: bool,

    // firebase push transport
    #[clap(long, env, default_value = "")]
    pub firebase_api_key: String,

    #[clap(long, env, default_value = "")]
    pub firebase_project_id: String,

    #[clap(long, env, default_value = "")]
    pub firebase_app_id: String,

    /// Overridable for tests; empty project id disables real delivery.
    #[clap(
        long,
        env,
        default_value = "https://fcm.googleapis.com/v1/projects/{project}/messages:send"
    )]
    pub fcm_endpoint: String,

    // sms transport
    #[clap(long, env, default_value = "")]
    pub sms_api_key: String,

    #[clap(long, env, default_value = "")]
    pub sms_sender_id: String,

    // otp / reset
    #[clap(long, env, default_value_t = 300)]
    pub otp_step_seconds: u64,

    #[clap(long, env, default_value_t = 900)]
    pub reset_token_ttl_seconds: u64,

    // notification fan-out
    #[clap(long, env, default_value_t = 500)]
    pub notification_quota_per_minute: u32,

    #[clap(long, env, default_value_t = 3)]
    pub notification_retry_attempts: u32,

    #[clap(long, env, default_value_t = 4)]
    pub notification_retry_min_wait_seconds: u64,

    #[clap(long, env, default_value_t = 10)]
    pub notification_retry_max_wait_seconds: u64,

    #[clap(long, env, default_value_t = 12)]
    pub bcrypt_cost: u32,

    #[clap(long, env, default_value = "local")]
    pub app_env: String,
}
