pub mod accounts;
pub mod auction;
pub mod bidding;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod scheduler;
pub mod session;
pub mod store;
pub mod templates;
