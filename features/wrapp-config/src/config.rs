use std::{ops::Deref, sync::Arc};

/// A wrapper type to allow for config injections
///
/// Every config added to a [crate::provider::ConfigProvider] is installed into the container as
/// `Config<T>`, so components declare it as a constructor parameter.
///
/// # Example
/// ```rust
/// # use wrapp_config::{config::Config, provider::ConfigProvider};
/// # use wrapp_ioc::{Component, Constructor, DiBuilder};
/// pub struct MyModuleConfig {
///     enabled: bool,
/// }
///
/// pub struct MyModule {
///     enabled: bool,
/// }
///
/// let mut config_provider = ConfigProvider::new();
/// config_provider.add_config(MyModuleConfig { enabled: true }).unwrap();
///
/// let container = config_provider
///     .install(DiBuilder::new())
///     .add_component(
///         Component::<MyModule>::new().constructor(
///             Constructor::new(|args| {
///                 let config = args.take::<Config<MyModuleConfig>>()?;
///                 Ok(MyModule { enabled: config.enabled })
///             })
///             .param::<Config<MyModuleConfig>>(),
///         ),
///     )
///     .start::<MyModule>()
///     .unwrap();
///
/// assert!(container.require::<MyModule>().unwrap().enabled);
/// ```
pub struct Config<T> {
    inner: Arc<T>,
}
impl<T> Deref for Config<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
impl<T> Clone for Config<T> {
    fn clone(&self) -> Self {
        Config {
            inner: self.inner.clone(),
        }
    }
}
impl<T> Config<T> {
    pub(crate) fn new(inner: Arc<T>) -> Self {
        Config { inner }
    }

    pub fn inner(&self) -> Arc<T> {
        self.inner.clone()
    }

    pub fn into_inner(self) -> Arc<T> {
        self.inner
    }
}
