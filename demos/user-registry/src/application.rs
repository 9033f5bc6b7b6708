use std::sync::Arc;

use wrapp_config::config::Config;
use wrapp_ioc::{Component, Constructor, DiInitiator, DynError};

use crate::{
    model::User,
    service::{UserService, UserServiceError, UserServiceImpl, UserServiceImpl2},
};

/// Output settings of the registry walkthrough
pub struct RegistryConfig {
    pub separator: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        RegistryConfig {
            separator: "-".repeat(20),
        }
    }
}

/// Walks through the registry once on startup
pub struct UserRegistryApplication {
    user_service: Arc<dyn UserService>,
    config: Arc<Config<RegistryConfig>>,
}

impl UserRegistryApplication {
    pub fn component() -> Component<Self> {
        Component::new()
            .constructor(
                Constructor::new(|args| {
                    Ok(UserRegistryApplication {
                        user_service: args.take()?,
                        config: args.take()?,
                    })
                })
                .qualified_param::<dyn UserService>("UserServiceImpl2")
                .param::<Config<RegistryConfig>>()
                .designated(),
            )
            .post_construct("display_all_users", Self::display_all_users)
    }

    fn display_all_users(&self, _di: &mut DiInitiator) -> Result<(), DynError> {
        self.print("Original user list: ");

        self.user_service
            .add_user(User::new(3, "Paul", "Strong", (2006, 8, 20))?);
        self.print("User list with added user: ");

        let user = self
            .user_service
            .get_user_by_id(3)
            .ok_or(UserServiceError::UnknownId(3))?;
        self.user_service.remove_user(&user)?;
        self.print("User list with removed user: ");

        Ok(())
    }

    fn print(&self, heading: &str) {
        println!("{heading}");
        for user in self.user_service.get_all_users() {
            println!("{user}");
        }
        println!("{}", self.config.separator);
    }

    pub fn user_service(&self) -> &Arc<dyn UserService> {
        &self.user_service
    }
}

pub fn user_service_impl() -> Component<UserServiceImpl> {
    Component::new()
        .provides::<dyn UserService>(|it| it)
        .constructor(Constructor::new(|_| Ok(UserServiceImpl::new()?)))
}

pub fn user_service_impl2() -> Component<UserServiceImpl2> {
    Component::new()
        .provides::<dyn UserService>(|it| it)
        .constructor(Constructor::no_args(UserServiceImpl2::default))
}
