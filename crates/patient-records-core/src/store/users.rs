//! User collection operations.

use super::{keys, Record, RecordStore, StoreResult};
use crate::models::{new_record_id, NewUser, User};
use crate::storage::KeyValueStorage;

impl Record for User {
    const COLLECTION: &'static str = keys::USERS;

    fn id(&self) -> &str {
        &self.id
    }
}

impl<S: KeyValueStorage> RecordStore<S> {
    /// List all users.
    pub fn get_users(&self) -> StoreResult<Vec<User>> {
        self.get_all()
    }

    /// Get a user by ID.
    pub fn get_user_by_id(&self, id: &str) -> StoreResult<Option<User>> {
        self.get_by_id(id)
    }

    /// Get a user by exact email match.
    pub fn get_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        Ok(self.get_users()?.into_iter().find(|u| u.email == email))
    }

    /// Create a user. Duplicate emails are not rejected here.
    pub fn create_user(&mut self, user: NewUser) -> StoreResult<User> {
        let user = self.append(user.into_user(new_record_id()))?;
        tracing::debug!(user_id = %user.id, role = %user.role, "created user");
        Ok(user)
    }
}
