//! Process-wide registry of named client factories.
//!
//! Applications that select a storage backend by name from their configuration register factories here and build
//! clients from a JSON configuration value:
//! ```rust
//! use serde_json::json;
//! use ucloud_ufile::{create_driver, register_default_drivers, DRIVER_NAME};
//!
//! register_default_drivers();
//! let client = create_driver(DRIVER_NAME, json!({
//!     "bucket": "photos",
//!     "public_key": "pk",
//!     "secret_key": "sk",
//! })).unwrap();
//! assert_eq!(client.endpoint(), "http://photos.ufile.ucloud.cn");
//! ```
use {
    crate::{constants::DRIVER_NAME, UfileClient, UfileConfig, UfileError},
    lazy_static::lazy_static,
    log::{debug, info},
    serde_json::Value,
    std::{
        collections::HashMap,
        sync::{PoisonError, RwLock},
    },
};

/// A function that builds a client from a JSON configuration value.
pub type DriverFactory = fn(Value) -> Result<UfileClient, UfileError>;

lazy_static! {
    static ref DRIVERS: RwLock<HashMap<String, DriverFactory>> = RwLock::new(HashMap::new());
}

/// Register `factory` under `name`, replacing any factory previously registered under that name.
pub fn register_driver<N: Into<String>>(name: N, factory: DriverFactory) {
    let name = name.into();
    let mut drivers = DRIVERS.write().unwrap_or_else(PoisonError::into_inner);
    if drivers.insert(name.clone(), factory).is_some() {
        debug!("Replaced driver factory {}", name);
    } else {
        info!("Driver factory registered: {}", name);
    }
}

/// Build a client with the factory registered under `name`.
///
/// # Errors
/// Returns [`UfileError::UnknownDriver`] if no factory is registered under `name`; otherwise whatever the factory
/// returns.
pub fn create_driver(name: &str, config: Value) -> Result<UfileClient, UfileError> {
    let factory = {
        let drivers = DRIVERS.read().unwrap_or_else(PoisonError::into_inner);
        drivers.get(name).copied()
    };

    match factory {
        Some(factory) => factory(config),
        None => Err(UfileError::UnknownDriver(name.to_string())),
    }
}

/// Register the factories this crate provides.
pub fn register_default_drivers() {
    register_driver(DRIVER_NAME, ufile_driver);
}

/// The names of all registered drivers, sorted.
pub fn registered_drivers() -> Vec<String> {
    let drivers = DRIVERS.read().unwrap_or_else(PoisonError::into_inner);
    let mut names: Vec<String> = drivers.keys().cloned().collect();
    names.sort();
    names
}

fn ufile_driver(config: Value) -> Result<UfileClient, UfileError> {
    let config: UfileConfig = serde_json::from_value(config)
        .map_err(|e| UfileError::InvalidConfig(format!("Invalid {} configuration: {}", DRIVER_NAME, e)))?;
    UfileClient::new(&config)
}
