use wrapp_ioc::TypeInfo;

/// Errors when registering or acquiring a config
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The Config type is already registered
    #[error("The Config type '{0}' is already registered")]
    ConfigAlreadyRegistered(TypeInfo),
    /// The required Config is not known
    #[error("The required Config type '{0}' is not known")]
    ConfigMissing(TypeInfo),
}
