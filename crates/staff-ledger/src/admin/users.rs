use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::schema::{parse_list, Fields, SchemaError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserRole {
    Admin,
    Staff,
    Other(String),
}

impl UserRole {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "admin" => Self::Admin,
            "staff" | "user" => Self::Staff,
            _ => Self::Other(raw.trim().to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Admin => "admin",
            Self::Staff => "staff",
            Self::Other(raw) => raw,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl Serialize for UserRole {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Entry of the admin staff directory.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub staff_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub role: UserRole,
}

impl UserSummary {
    pub fn from_value(value: &Value) -> Result<Self, SchemaError> {
        let fields = Fields::of(value, "user")?;
        Ok(Self {
            staff_id: fields.required_id("staffId")?,
            name: fields.required_string("name")?,
            email: fields.optional_string("email")?,
            role: fields
                .optional_string("role")?
                .map(|role| UserRole::parse(&role))
                .unwrap_or(UserRole::Staff),
        })
    }

    pub fn list_from_value(value: &Value) -> Result<Vec<Self>, SchemaError> {
        parse_list(value, "user list", Self::from_value)
    }
}

/// The signed-in caller's profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub staff_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub role: UserRole,
}

impl UserProfile {
    pub fn from_value(value: &Value) -> Result<Self, SchemaError> {
        let fields = Fields::of(value, "user profile")?;
        Ok(Self {
            staff_id: fields.optional_id("staffId")?,
            name: fields.optional_string("name")?,
            email: fields.optional_string("email")?,
            role: UserRole::parse(&fields.required_string("role")?),
        })
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn directory_validates_every_entry() {
        let users = UserSummary::list_from_value(&json!([
            { "staffId": 1001, "name": "Ama", "email": "ama@coop.example", "role": "ADMIN" },
            { "staffId": "1002", "name": "Kofi" }
        ]))
        .expect("valid list");
        assert_eq!(users[0].role, UserRole::Admin);
        assert_eq!(users[1].role, UserRole::Staff);
        assert_eq!(users[1].email, None);

        let error = UserSummary::list_from_value(&json!([
            { "staffId": 1001, "name": "Ama" },
            { "staffId": 1002 }
        ]))
        .expect_err("second entry lacks a name");
        assert_eq!(error.to_string(), "entry 1: missing required field 'name'");
    }

    #[test]
    fn profile_role_decides_admin_access() {
        let admin = UserProfile::from_value(&json!({ "role": " Admin " })).expect("profile");
        assert!(admin.is_admin());

        let auditor = UserProfile::from_value(&json!({ "role": "auditor" })).expect("profile");
        assert!(!auditor.is_admin());
        assert_eq!(auditor.role.label(), "auditor");

        assert!(UserProfile::from_value(&json!({ "name": "x" })).is_err());
    }

    #[test]
    fn role_serializes_as_label() {
        let user = UserSummary {
            staff_id: "7".to_string(),
            name: "Efua".to_string(),
            email: None,
            role: UserRole::Admin,
        };
        let value = serde_json::to_value(&user).expect("serializes");
        assert_eq!(value, json!({ "staffId": "7", "name": "Efua", "role": "admin" }));
    }
}
