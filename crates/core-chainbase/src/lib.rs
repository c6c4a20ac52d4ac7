pub mod client;
pub mod error;
pub mod models;


pub use client::{
    ChainbaseClient, ClientConfig, DEFAULT_API_KEY, DEFAULT_BASE_URL, DEFAULT_USER_AGENT,
    WarehouseService,
};
pub use error::{ChainbaseError, ChainbaseResult};
pub use models::{Response, WarehouseColumn, WarehouseData};
