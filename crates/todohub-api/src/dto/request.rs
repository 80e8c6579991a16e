//! Request documents with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// `POST /users` and `POST /users/login` body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CredentialsDocument {
    /// Primary data.
    #[validate(nested)]
    pub data: CredentialsData,
}

/// Credentials resource object.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CredentialsData {
    /// Resource type; must be `users`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Name and password.
    #[validate(nested)]
    pub attributes: CredentialsAttributes,
}

/// Name and password.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CredentialsAttributes {
    /// Login name.
    #[validate(length(min = 1, message = "Username or password can't be empty!"))]
    pub name: String,
    /// Password.
    #[validate(length(min = 1, message = "Username or password can't be empty!"))]
    pub password: String,
}

/// `PATCH /users/{id}` body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateUserDocument {
    /// Primary data.
    #[validate(nested)]
    pub data: UpdateUserData,
}

/// Account changes resource object.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateUserData {
    /// Identifier of the account; must equal the path id.
    #[serde(default)]
    pub id: String,
    /// Requested changes.
    #[validate(nested)]
    pub attributes: UpdateUserAttributes,
}

/// Requested account changes.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserAttributes {
    /// Desired login name.
    #[validate(length(max = 100))]
    pub new_name: Option<String>,
    /// Current password.
    #[serde(default)]
    pub old_password: String,
    /// Desired password.
    pub new_password: Option<String>,
}

/// `POST /todos` and `PUT /todos/{id}` body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TodoDocument {
    /// Primary data.
    #[validate(nested)]
    pub data: TodoData,
}

/// Todo resource object.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TodoData {
    /// Identifier; required on update and must equal the path id.
    pub id: Option<String>,
    /// Todo fields.
    #[validate(nested)]
    pub attributes: TodoAttributesInput,
}

/// Todo fields.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TodoAttributesInput {
    /// Free-form text.
    #[validate(length(min = 1, max = 255, message = "Description must be 1 to 255 characters"))]
    pub description: String,
}
