use serde::Serialize;

use crate::base::resource_id;

pub type UserId = i64;

/// User record managed by the directory.
///
/// `id` is assigned by persistence and stays `None` until the user is
/// inserted. The remaining fields are populated from the submitted form and
/// checked against [`crate::domain::validation::rules::user`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: Option<UserId>,
    pub name: String,
    pub age: Option<i32>,
    pub birthday: String,
}

resource_id!(User, "directory::User");

impl User {
    pub fn with_id(mut self, id: UserId) -> Self {
        self.id = Some(id);
        self
    }
}

#[cfg(test)]
impl User {
    pub fn new(name: impl Into<String>, age: i32, birthday: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            age: Some(age),
            birthday: birthday.into(),
        }
    }
}
