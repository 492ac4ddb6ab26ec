pub mod config;
pub mod config_validator;
pub mod error;
pub mod handlers;
pub mod health;
pub mod id_generator;
pub mod kv;
pub mod middleware;
pub mod redis;
pub mod response;
pub mod sanitizer;
pub mod selection;
pub mod server;
pub mod spin_counter;
pub mod theme;
pub mod wheel;
pub mod wheel_store;

pub use config::Config;
pub use error::{Result, WheelError};
pub use handlers::AppState;
pub use kv::{KvStore, MemoryStore};
pub use server::create_app;
pub use wheel::{ColorScheme, Participant, SpinResult, WheelConfig};
