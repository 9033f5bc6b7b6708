use std::sync::{Mutex, MutexGuard, PoisonError};

use thiserror::Error;

use crate::model::User;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UserServiceError {
    #[error("User {0} does not exist")]
    UserMissing(User),
    #[error("No user with id {0}")]
    UnknownId(u64),
    #[error("{year}-{month}-{day} is not a valid date of birth")]
    InvalidBirthDate { year: i32, month: u32, day: u32 },
}

pub trait UserService: Send + Sync {
    fn get_all_users(&self) -> Vec<User>;

    fn get_user_by_id(&self, id: u64) -> Option<User>;

    fn add_user(&self, user: User);

    fn remove_user(&self, user: &User) -> Result<(), UserServiceError>;
}

fn lock(users: &Mutex<Vec<User>>) -> MutexGuard<'_, Vec<User>> {
    users.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Registry seeded with the founding users
pub struct UserServiceImpl {
    users: Mutex<Vec<User>>,
}

impl UserServiceImpl {
    pub fn new() -> Result<Self, UserServiceError> {
        Ok(UserServiceImpl {
            users: Mutex::new(vec![
                User::new(1, "Anton", "Ivchenko", (2002, 6, 8))?,
                User::new(2, "Tracy", "Penn", (1990, 2, 10))?,
            ]),
        })
    }
}

impl UserService for UserServiceImpl {
    fn get_all_users(&self) -> Vec<User> {
        lock(&self.users).clone()
    }

    fn get_user_by_id(&self, id: u64) -> Option<User> {
        lock(&self.users).iter().find(|user| user.id == id).cloned()
    }

    fn add_user(&self, user: User) {
        lock(&self.users).push(user);
    }

    fn remove_user(&self, user: &User) -> Result<(), UserServiceError> {
        let mut users = lock(&self.users);
        match users.iter().position(|existing| existing == user) {
            Some(index) => {
                users.remove(index);
                Ok(())
            }
            None => Err(UserServiceError::UserMissing(user.clone())),
        }
    }
}

/// Registry starting out empty
#[derive(Default)]
pub struct UserServiceImpl2 {
    users: Mutex<Vec<User>>,
}

impl UserService for UserServiceImpl2 {
    fn get_all_users(&self) -> Vec<User> {
        println!("Hello, Dependency Injection");
        lock(&self.users).clone()
    }

    fn get_user_by_id(&self, id: u64) -> Option<User> {
        lock(&self.users).iter().find(|user| user.id == id).cloned()
    }

    fn add_user(&self, user: User) {
        lock(&self.users).push(user);
    }

    /// Removing an unknown user is a no-op
    fn remove_user(&self, user: &User) -> Result<(), UserServiceError> {
        lock(&self.users).retain(|existing| existing != user);
        Ok(())
    }
}
