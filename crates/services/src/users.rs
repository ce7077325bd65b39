//! User lifecycle.

use std::sync::Arc;

use stockroom_core::{DomainError, DomainResult, UserId};
use stockroom_domain::{AuditOperation, User};
use stockroom_store::{AuditSink, InMemoryStore};

/// Create-or-update request; create when `id` is absent.
#[derive(Debug, Clone)]
pub struct SaveUser {
    pub id: Option<UserId>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

pub struct UserService {
    store: Arc<InMemoryStore>,
    audit: Arc<dyn AuditSink>,
}

impl UserService {
    pub fn new(store: Arc<InMemoryStore>, audit: Arc<dyn AuditSink>) -> Self {
        Self { store, audit }
    }

    pub fn list(&self) -> DomainResult<Vec<User>> {
        Ok(self.store.read()?.users.iter().cloned().collect())
    }

    pub fn get(&self, id: UserId) -> DomainResult<User> {
        self.store
            .read()?
            .user(id)
            .cloned()
            .ok_or_else(|| DomainError::not_found(format!("user {id} not found")))
    }

    pub fn save(&self, req: SaveUser) -> DomainResult<User> {
        if req.first_name.trim().is_empty() {
            return Err(DomainError::validation("first name is required"));
        }
        if req.last_name.trim().is_empty() {
            return Err(DomainError::validation("last name is required"));
        }
        if req.email.trim().is_empty() {
            return Err(DomainError::validation("email is required"));
        }
        if req.password.trim().is_empty() {
            return Err(DomainError::validation("password is required"));
        }

        let mut uow = self.store.unit_of_work()?;

        let (saved, operation) = match req.id {
            None => {
                if uow.user_by_email_ci(&req.email).is_some() {
                    return Err(DomainError::conflict("a user with that email already exists"));
                }

                let raw = uow.users.allocate();
                let user = User {
                    id: UserId::new(raw),
                    first_name: req.first_name,
                    last_name: req.last_name,
                    email: req.email,
                    password: req.password,
                };
                uow.users.insert(raw, user.clone());
                (user, AuditOperation::Create)
            }
            Some(id) => {
                let user = uow
                    .users
                    .get_mut(id.as_i64())
                    .ok_or_else(|| DomainError::not_found(format!("user {id} not found")))?;
                user.first_name = req.first_name;
                user.last_name = req.last_name;
                user.email = req.email;
                user.password = req.password;
                (user.clone(), AuditOperation::Update)
            }
        };

        drop(uow);
        self.audit.record("User", saved.id.as_i64(), operation, None);
        Ok(saved)
    }

    pub fn delete(&self, id: UserId) -> DomainResult<()> {
        let mut uow = self.store.unit_of_work()?;

        if uow.users.remove(id.as_i64()).is_none() {
            return Err(DomainError::not_found(format!("user {id} not found")));
        }

        drop(uow);
        self.audit
            .record("User", id.as_i64(), AuditOperation::Delete, None);
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::Services;

    pub(crate) fn save_user(email: &str) -> SaveUser {
        SaveUser {
            id: None,
            first_name: "Ana".to_string(),
            last_name: "Pereira".to_string(),
            email: email.to_string(),
            password: "secret".to_string(),
        }
    }

    #[test]
    fn duplicate_email_is_case_insensitive() {
        let services = Services::in_memory();
        services.users.save(save_user("ana@example.com")).unwrap();

        let err = services.users.save(save_user("ANA@example.com")).unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[test]
    fn blank_required_fields_are_rejected() {
        let services = Services::in_memory();
        let mut req = save_user("ana@example.com");
        req.password = "  ".to_string();

        let err = services.users.save(req).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
