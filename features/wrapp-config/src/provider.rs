use std::{
    any::{Any, TypeId},
    collections::HashMap,
    sync::Arc,
};

use wrapp_ioc::{DiBuilder, TypeInfo};

use crate::{config::Config, errors::ConfigError};

type InstallFn = Box<dyn FnOnce(DiBuilder) -> DiBuilder + Send + Sync>;

struct ConfigEntry {
    config: Arc<dyn Any + Send + Sync + 'static>,
    install: InstallFn,
}

/// A provider to register all configs.
///
/// Configs can be registered and retrieved based on type.
/// Once complete, [ConfigProvider::install] hands every config to the container as a [Config].
#[derive(Default)]
pub struct ConfigProvider {
    configs: HashMap<TypeId, ConfigEntry>,
}

impl ConfigProvider {
    /// Initializes an empty Config Provider
    pub fn new() -> Self {
        Self::default()
    }

    /// Retrieve a config with specified type.
    ///
    /// If the config type is not available, it will return a [`ConfigError`] runtime error
    pub fn get_config<T: Send + Sync + 'static>(&self) -> Result<Arc<T>, ConfigError> {
        let missing = || ConfigError::ConfigMissing(TypeInfo::of::<T>());

        let entry = self.configs.get(&TypeId::of::<T>()).ok_or_else(missing)?;
        entry.config.clone().downcast().map_err(|_| missing())
    }

    /// Add a config to the registry.
    ///
    /// If the config type is already registered, it will return a
    /// [`ConfigError`] runtime error
    pub fn add_config<T: Send + Sync + 'static>(
        &mut self,
        config: T,
    ) -> Result<&mut Self, ConfigError> {
        let type_id = TypeId::of::<T>();

        if self.configs.contains_key(&type_id) {
            return Err(ConfigError::ConfigAlreadyRegistered(TypeInfo::of::<T>()));
        }

        let config = Arc::new(config);
        let injected = Config::new(config.clone());
        self.configs.insert(
            type_id,
            ConfigEntry {
                config,
                install: Box::new(move |builder| builder.add_instance(injected)),
            },
        );
        Ok(self)
    }

    /// Can optionally add a config to the registry.
    ///
    /// If the config provided is `Some(T)`, it will be the same as calling [`ConfigProvider::add_config`]
    /// If the config provided is `None`, then the function just returns `Ok(self)` for chaining
    pub fn maybe_add_config<T: Send + Sync + 'static>(
        &mut self,
        config: Option<T>,
    ) -> Result<&mut Self, ConfigError> {
        match config {
            Some(c) => self.add_config(c),
            None => Ok(self),
        }
    }

    pub fn len(&self) -> usize {
        self.configs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }

    /// Registers every config as a pre built `Config<T>` instance
    pub fn install(self, builder: DiBuilder) -> DiBuilder {
        tracing::debug!("Installing {} configs", self.configs.len());
        self.configs
            .into_values()
            .fold(builder, |builder, entry| (entry.install)(builder))
    }
}
