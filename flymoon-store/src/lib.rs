pub mod app_config;
pub mod redis_store;
pub mod session;
pub mod storage;

pub use app_config::Config;
pub use redis_store::RedisStore;
pub use session::{SessionCache, Stored};
pub use storage::{MemoryStore, StorageError, StoragePort};
