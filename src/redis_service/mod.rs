pub mod redis_service;

pub use redis_service::{
    CompletionCache, JwtBlacklist, OtpAttempts, OtpRedisService, get_redis, init_redis_connection,
};
