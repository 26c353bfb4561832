use crate::{User, UserPayload, KNOWN_STATUSES};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserFormError {
    #[error("Le nom est obligatoire.")]
    MissingName,
    #[error("Le nom d'utilisateur est obligatoire.")]
    MissingUsername,
    #[error("Le mot de passe est obligatoire pour un nouvel utilisateur.")]
    MissingPassword,
    #[error("Statut inconnu : {0}")]
    UnknownStatus(String),
}

/// Editable state of the user create/edit form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserForm {
    pub name: String,
    pub username: String,
    pub email: String,
    pub status: String,
    pub user_id: String,
    pub password: String,
}

impl UserForm {
    pub fn blank() -> Self {
        Self {
            status: KNOWN_STATUSES[0].to_string(),
            ..Self::default()
        }
    }

    /// Prefill from an existing user; the password is never read back
    pub fn from_user(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            username: user.username.clone(),
            email: user.email.clone(),
            status: user.status.clone(),
            user_id: user.user_id.clone().unwrap_or_default(),
            password: String::new(),
        }
    }

    /// Validate and build the request body. A password is required when
    /// creating; on update an empty password leaves it unchanged.
    pub fn to_payload(&self, creating: bool) -> Result<UserPayload, UserFormError> {
        let name = self.name.trim();
        let username = self.username.trim();
        let status = self.status.trim();

        if name.is_empty() {
            return Err(UserFormError::MissingName);
        }
        if username.is_empty() {
            return Err(UserFormError::MissingUsername);
        }
        if !KNOWN_STATUSES.contains(&status) {
            return Err(UserFormError::UnknownStatus(status.to_string()));
        }
        if creating && self.password.is_empty() {
            return Err(UserFormError::MissingPassword);
        }

        let non_empty = |value: &str| {
            let value = value.trim();
            (!value.is_empty()).then(|| value.to_string())
        };

        Ok(UserPayload {
            name: name.to_string(),
            username: username.to_string(),
            email: self.email.trim().to_string(),
            status: status.to_string(),
            user_id: non_empty(&self.user_id),
            password: (!self.password.is_empty()).then(|| self.password.clone()),
        })
    }
}

/// Sort users by display name for dropdowns
pub fn sorted_by_name(users: &[User]) -> Vec<User> {
    let mut users = users.to_vec();
    users.sort_by_key(|u| u.name.to_lowercase());
    users
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> UserForm {
        UserForm {
            name: " Alice Martin ".to_string(),
            username: "alice".to_string(),
            email: "alice@example.org".to_string(),
            status: "Moniteur".to_string(),
            user_id: "".to_string(),
            password: "s3cret".to_string(),
        }
    }

    #[test]
    fn test_create_requires_password() {
        let form = UserForm {
            password: String::new(),
            ..filled()
        };
        assert_eq!(form.to_payload(true), Err(UserFormError::MissingPassword));
        let payload = form.to_payload(false).unwrap();
        assert_eq!(payload.password, None);
    }

    #[test]
    fn test_payload_is_trimmed() {
        let payload = filled().to_payload(true).unwrap();
        assert_eq!(payload.name, "Alice Martin");
        assert_eq!(payload.user_id, None);
        assert_eq!(payload.password.as_deref(), Some("s3cret"));
    }

    #[test]
    fn test_required_fields() {
        let form = UserForm { name: "  ".to_string(), ..filled() };
        assert_eq!(form.to_payload(true), Err(UserFormError::MissingName));

        let form = UserForm { username: String::new(), ..filled() };
        assert_eq!(form.to_payload(true), Err(UserFormError::MissingUsername));

        let form = UserForm { status: "Chef".to_string(), ..filled() };
        assert_eq!(form.to_payload(true), Err(UserFormError::UnknownStatus("Chef".to_string())));
    }

    #[test]
    fn test_from_user_drops_password() {
        let user = User {
            id: 3,
            user_id: Some("B-07".to_string()),
            name: "Bruno Petit".to_string(),
            username: "bruno".to_string(),
            email: String::new(),
            status: "Bar".to_string(),
        };
        let form = UserForm::from_user(&user);
        assert_eq!(form.user_id, "B-07");
        assert!(form.password.is_empty());
        assert_eq!(UserForm::blank().status, "Moniteur");
    }

    #[test]
    fn test_sorted_by_name() {
        let user = |id: i64, name: &str| User {
            id,
            user_id: None,
            name: name.to_string(),
            username: name.to_lowercase(),
            email: String::new(),
            status: "Bar".to_string(),
        };
        let sorted = sorted_by_name(&[user(1, "zoé"), user(2, "Adam"), user(3, "bruno")]);
        let ids: Vec<i64> = sorted.iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }
}
