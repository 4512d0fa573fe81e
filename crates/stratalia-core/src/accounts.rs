//! User accounts.
//!
//! Accounts only store an already-hashed password; hashing and
//! verification belong to the web layer.

use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Account {
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub role: Role,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub blocked: bool,
    pub blocked_reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Default)]
pub struct Accounts {
    by_id: DashMap<String, Account>,
    /// Lowercased email to account id.
    by_email: DashMap<String, String>,
}

impl Accounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a regular user account.
    ///
    /// # Errors
    ///
    /// [`CoreError::Conflict`] when the email is already registered.
    pub fn register(&self, email: &str, full_name: &str, password_hash: String) -> CoreResult<Account> {
        self.create(email, full_name, password_hash, Role::User)
    }

    /// Creates an administrator account.
    ///
    /// # Errors
    ///
    /// [`CoreError::Conflict`] when the email is already registered.
    pub fn add_admin(&self, email: &str, full_name: &str, password_hash: String) -> CoreResult<Account> {
        self.create(email, full_name, password_hash, Role::Admin)
    }

    fn create(&self, email: &str, full_name: &str, password_hash: String, role: Role) -> CoreResult<Account> {
        let key = email.trim().to_lowercase();
        let id = Uuid::new_v4().to_string();

        match self.by_email.entry(key.clone()) {
            Entry::Occupied(_) => {
                return Err(CoreError::Conflict(
                    "Er bestaat al een account met dit e-mailadres".to_string(),
                ));
            }
            Entry::Vacant(slot) => {
                slot.insert(id.clone());
            }
        }

        let account = Account {
            id: id.clone(),
            email: key,
            full_name: full_name.trim().to_string(),
            role,
            password_hash,
            blocked: false,
            blocked_reason: None,
            created_at: Utc::now(),
        };
        self.by_id.insert(id, account.clone());
        tracing::info!("Account created: {} ({})", account.email, account.role.as_str());
        Ok(account)
    }

    pub fn get(&self, id: &str) -> Option<Account> {
        self.by_id.get(id).map(|a| a.clone())
    }

    pub fn find_by_email(&self, email: &str) -> Option<Account> {
        let id = self.by_email.get(&email.trim().to_lowercase())?.clone();
        self.get(&id)
    }

    /// Blocks or unblocks an account.
    ///
    /// # Errors
    ///
    /// [`CoreError::NotFound`] for an unknown id, [`CoreError::Forbidden`]
    /// when trying to block an administrator.
    pub fn set_blocked(&self, id: &str, blocked: bool, reason: Option<String>) -> CoreResult<Account> {
        let mut account = self
            .by_id
            .get_mut(id)
            .ok_or_else(|| CoreError::NotFound(format!("account {id}")))?;

        if blocked && account.role == Role::Admin {
            return Err(CoreError::Forbidden(
                "Beheerders kunnen niet geblokkeerd worden".to_string(),
            ));
        }

        account.blocked = blocked;
        account.blocked_reason = if blocked { reason } else { None };
        tracing::warn!("Account {} {}", account.email, if blocked { "blocked" } else { "unblocked" });
        Ok(account.clone())
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}
