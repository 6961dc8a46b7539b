//! Current-user session scalar.

use super::{keys, RecordStore, StoreResult};
use crate::models::User;
use crate::storage::KeyValueStorage;

impl<S: KeyValueStorage> RecordStore<S> {
    /// The signed-in user, if the session id still names an existing user.
    pub fn get_current_user(&self) -> StoreResult<Option<User>> {
        match self.storage.get_item(keys::CURRENT_USER_ID)? {
            Some(user_id) if !user_id.is_empty() => self.get_user_by_id(&user_id),
            _ => Ok(None),
        }
    }

    /// Record `user_id` as the signed-in user. The id is not validated.
    pub fn set_current_user(&mut self, user_id: &str) -> StoreResult<()> {
        self.storage.set_item(keys::CURRENT_USER_ID, user_id)?;
        Ok(())
    }

    /// Clear the session.
    pub fn logout(&mut self) -> StoreResult<()> {
        self.storage.remove_item(keys::CURRENT_USER_ID)?;
        Ok(())
    }
}
