// User aggregate: entity, write models and value objects

pub mod value_objects;

pub use value_objects::{Password, Username};

/// A persisted user record
///
/// `id` is assigned by the store on insert and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub username: Username,
    pub password: Password,
    pub active: bool,
}

/// User data for insertion, before the store assigns an id
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: Username,
    pub password: Password,
    pub active: bool,
}

/// Partial update of a user
///
/// Absent fields keep their stored value.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub username: Option<Username>,
    pub password: Option<Password>,
    pub active: Option<bool>,
}

impl UserChanges {
    /// Returns true when no field would change
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.password.is_none() && self.active.is_none()
    }
}
