use crate::limiter::RateLimiter;
use core_chainbase::WarehouseService;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub warehouse: Arc<dyn WarehouseService>,
    pub limiter: Arc<RateLimiter>,
}

impl AppState {
    pub fn new(warehouse: Arc<dyn WarehouseService>, limiter: Arc<RateLimiter>) -> Self {
        Self { warehouse, limiter }
    }
}
