pub mod file;
pub mod memory;
pub mod redis;
pub mod store;

pub use file::FileBackend;
pub use memory::MemoryBackend;
pub use self::redis::{create_redis_client, RedisBackend};
pub use store::{PersistentStore, StorageBackend, StoreKey};
