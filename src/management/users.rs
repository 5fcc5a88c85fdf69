use std::path::PathBuf;

use chrono::Utc;

use crate::{error::StoreError, types::User, utils};

use super::{read_collection, write_collection};

const USERS_FILE: &str = "users.json";

pub struct UserManager {
    root: PathBuf,
    users: Vec<User>,
}

impl UserManager {
    pub async fn load(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        let users = read_collection(&root.join(USERS_FILE)).await?;
        Ok(Self { root, users })
    }

    pub async fn persist(&self) -> Result<(), StoreError> {
        write_collection(&self.path(), &self.users).await
    }

    /// Registers a user. The username is stored lowercased and the password
    /// only as a bcrypt hash.
    ///
    /// # Errors
    ///
    /// [`StoreError::AlreadyTaken`] if the username or email is in use,
    /// [`StoreError::Hash`] if the password cannot be hashed.
    pub fn signup(&mut self, username: &str, email: &str, password: &str) -> Result<User, StoreError> {
        let username = username.trim().to_lowercase();
        let email = email.trim().to_string();

        if self
            .users
            .iter()
            .any(|u| u.username == username || u.email.eq_ignore_ascii_case(&email))
        {
            return Err(StoreError::AlreadyTaken);
        }

        let user = User {
            id: self.users.iter().map(|u| u.id).max().unwrap_or(0) + 1,
            email,
            username,
            password: utils::hash_password(password)?,
            image_url: None,
            created_at: Utc::now(),
        };
        self.users.push(user.clone());
        Ok(user)
    }

    /// Registers a user and writes the users file. If the write fails the user
    /// is dropped again, so memory never holds an account the file lacks.
    pub async fn register(
        &mut self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<User, StoreError> {
        let user = self.signup(username, email, password)?;
        if let Err(e) = self.persist().await {
            self.users.retain(|u| u.id != user.id);
            return Err(e);
        }
        Ok(user)
    }

    /// Returns the user whose username (case-insensitive) and password match.
    pub fn authenticate(&self, username: &str, password: &str) -> Option<&User> {
        let username = username.trim().to_lowercase();
        self.users
            .iter()
            .find(|u| u.username == username)
            .filter(|u| utils::verify_password(&u.password, password))
    }

    pub fn get(&self, user_id: u64) -> Option<&User> {
        self.users.iter().find(|u| u.id == user_id)
    }

    pub fn count(&self) -> usize {
        self.users.len()
    }

    fn path(&self) -> PathBuf {
        self.root.join(USERS_FILE)
    }
}
