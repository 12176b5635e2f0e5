pub mod health;
pub mod webhook;

pub use health::health_handler;
pub use webhook::{receive_webhook, verify_webhook};
