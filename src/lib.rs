pub mod config;
pub mod error;
pub mod event;
pub mod filter;
pub mod transport;
