use std::fmt::Display;

use chrono::NaiveDate;

use crate::service::UserServiceError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub dob: NaiveDate,
}

impl User {
    pub fn new(
        id: u64,
        first_name: &str,
        last_name: &str,
        (year, month, day): (i32, u32, u32),
    ) -> Result<Self, UserServiceError> {
        let dob = NaiveDate::from_ymd_opt(year, month, day)
            .ok_or(UserServiceError::InvalidBirthDate { year, month, day })?;

        Ok(User {
            id,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            dob,
        })
    }
}

impl Display for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "User(id={}, firstName={}, lastName={}, dob={})",
            self.id, self.first_name, self.last_name, self.dob
        )
    }
}
