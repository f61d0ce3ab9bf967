pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod services;

pub use config::StoreConfig;
pub use db::Store;
pub use error::StoreError;
