pub mod config;
pub mod kv;
pub mod token;

mod memory;
pub use memory::MemoryStore;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod local;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use local::LocalStore;

pub use config::LessonsConfig;
pub use kv::KeyValueStore;
pub use token::{TokenStore, TOKEN_KEY};
