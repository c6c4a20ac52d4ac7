pub mod error;
pub mod handlers;
pub mod limiter;
pub mod router;
pub mod state;

#[cfg(test)]
pub mod tests;
