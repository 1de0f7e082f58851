//! Cache module for Redis
//!
//! Connection handling with retry logic, and the Redis verification store.

pub mod redis_client;
pub mod verification_store;

#[cfg(test)]
mod tests;

pub use redis_client::RedisClient;
pub use verification_store::RedisVerificationRepository;
