pub mod configuration;
pub mod credentials;
pub mod sheets;
