use tracing_subscriber::EnvFilter;
use wrapp_config::provider::ConfigProvider;
use wrapp_ioc::DiBuilder;

use crate::application::{
    user_service_impl, user_service_impl2, RegistryConfig, UserRegistryApplication,
};

mod application;
mod model;
mod service;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut configs = ConfigProvider::new();
    configs.add_config(RegistryConfig::default())?;

    let builder = configs
        .install(DiBuilder::new())
        .add_component(user_service_impl())
        .add_component(user_service_impl2())
        .add_component(UserRegistryApplication::component());

    let container = builder.start::<UserRegistryApplication>()?;
    tracing::info!("Started {:?}", container);

    Ok(())
}
