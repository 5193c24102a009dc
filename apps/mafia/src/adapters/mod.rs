pub mod results_memory;
pub mod session_store_memory;
pub mod session_store_redis;

pub use results_memory::InMemoryResults;
pub use session_store_memory::InMemorySessionStore;
pub use session_store_redis::RedisSessionStore;
