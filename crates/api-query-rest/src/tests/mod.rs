pub mod common;
mod limiter;
