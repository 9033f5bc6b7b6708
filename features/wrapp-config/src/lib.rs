//! Wrapp Config provides a registry of configs that can be injected in the rest of the
//! components.
//!
//! Wrapp Config is split into two major parts:
//! 1. ConfigProvider: Used to create the registry of all configs and install it into the container
//! 2. Config<T>: A wrapper type to be able to inject and retrieve configs
//!
//! # Examples
//!
//! ```rust
//! use wrapp_config::provider::ConfigProvider;
//!
//! #[derive(Clone)]
//! struct AppConfig {
//!     host: String,
//!     port: u16,
//!     app_name: String,
//! }
//!
//! fn setup_config() {
//!     let app_config = AppConfig {
//!         host: "localhost".to_string(),
//!         port: 8080_u16,
//!         app_name: "My Awesome App".to_string(),
//!     };
//!
//!     let mut config_provider = ConfigProvider::new();
//!     let config_provider = match config_provider.add_config(app_config.clone()) {
//!         Ok(p) => p,
//!         Err(e) => {
//!             eprintln!("{e}");
//!             return;
//!         }
//!     };
//!
//!     let retrieved_config = match config_provider.get_config::<AppConfig>() {
//!         Ok(c) => c,
//!         Err(e) => {
//!             eprintln!("{e}");
//!             return;
//!         }
//!     };
//!
//!     assert_eq!(app_config.host, retrieved_config.host);
//!     assert_eq!(app_config.port, retrieved_config.port);
//!     assert_eq!(app_config.app_name, retrieved_config.app_name);
//! }
//! # setup_config();
//! ```
//!
//! Wrapp Config consists of the following components:
//!
//! 1. Config - for injecting a config into components
//! 2. Provider - for creating a registry of configs, adding, retrieving and installing configs
//! 3. Errors - for config errors

pub mod config;
pub mod errors;
pub mod provider;
