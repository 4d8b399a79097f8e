//! In-memory user store.
//!
//! Backs the server when no `DATABASE_URL` is configured and every
//! integration test. Behaves like the Postgres store: sequential ids,
//! username uniqueness, not-found on missing ids.

use std::collections::BTreeMap;

use chrono::Utc;
use tokio::sync::RwLock;

use atrium_model::{User, UserId};

use super::{NewUser, StoreError, UserStore};
use async_trait::async_trait;

#[derive(Debug)]
struct StoredUser {
    user: User,
    password_hash: String,
}

#[derive(Debug, Default)]
pub struct MemoryUserStore {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    users: BTreeMap<UserId, StoredUser>,
    next_id: UserId,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create(&self, new_user: NewUser) -> Result<User, StoreError> {
        let mut inner = self.inner.write().await;

        if inner
            .users
            .values()
            .any(|stored| stored.user.username == new_user.username)
        {
            return Err(StoreError::Conflict(format!(
                "username '{}' already exists",
                new_user.username
            )));
        }

        inner.next_id += 1;
        let id = inner.next_id;
        let now = Utc::now();
        let user = User {
            id,
            username: new_user.username,
            display_name: new_user.display_name,
            email: new_user.email,
            created_at: now,
            updated_at: now,
            last_login: None,
            is_active: true,
        };

        inner.users.insert(
            id,
            StoredUser {
                user: user.clone(),
                password_hash: new_user.password_hash,
            },
        );

        Ok(user)
    }

    async fn find_all(&self) -> Result<Vec<User>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.users.values().map(|stored| stored.user.clone()).collect())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.users.get(&id).map(|stored| stored.user.clone()))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .users
            .values()
            .find(|stored| stored.user.username == username)
            .map(|stored| stored.user.clone()))
    }

    async fn password_hash(&self, id: UserId) -> Result<Option<String>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.users.get(&id).map(|stored| stored.password_hash.clone()))
    }

    async fn update(&self, user: &User) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        let stored = inner
            .users
            .get_mut(&user.id)
            .ok_or_else(|| StoreError::user_not_found(user.id))?;

        stored.user.display_name = user.display_name.clone();
        stored.user.email = user.email.clone();
        stored.user.is_active = user.is_active;
        stored.user.updated_at = user.updated_at;
        Ok(())
    }

    async fn update_password(&self, id: UserId, password_hash: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        let stored = inner
            .users
            .get_mut(&id)
            .ok_or_else(|| StoreError::user_not_found(id))?;

        stored.password_hash = password_hash.to_string();
        stored.user.updated_at = Utc::now();
        Ok(())
    }

    async fn remove(&self, id: UserId) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        inner
            .users
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| StoreError::user_not_found(id))
    }

    async fn mark_login(&self, id: UserId) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        if let Some(stored) = inner.users.get_mut(&id) {
            stored.user.last_login = Some(Utc::now());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(username: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            display_name: format!("{username} display"),
            email: None,
            password_hash: "hash".to_string(),
        }
    }

    #[tokio::test]
    async fn ids_are_sequential() {
        let store = MemoryUserStore::new();
        let first = store.create(new_user("first")).await.unwrap();
        let second = store.create(new_user("second")).await.unwrap();
        assert_eq!(first.id + 1, second.id);
    }

    #[tokio::test]
    async fn duplicate_username_conflicts() {
        let store = MemoryUserStore::new();
        store.create(new_user("ana")).await.unwrap();
        let err = store.create(new_user("ana")).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn remove_missing_user_is_not_found() {
        let store = MemoryUserStore::new();
        let err = store.remove(99).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }
}
