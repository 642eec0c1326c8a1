//! Session wire types for the `/auth/*` endpoints.

use serde::{Deserialize, Serialize};

/// A staff account as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub name: String,
}

/// Response of `/auth/login` and `/auth/refresh`: the user record together
/// with a freshly minted token pair.
///
/// Token fields are snake_case on the wire; the access and refresh tokens
/// are only ever issued (and must only ever be stored) as a pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub user: User,
    pub access_token: String,
    pub refresh_token: String,
}

/// Response of `GET /auth/validate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateResponse {
    pub valid: bool,
    pub user: User,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_session_wire_format() {
        let json = serde_json::json!({
            "user": {"id": 1, "email": "staff@example.com", "name": "Staff"},
            "access_token": "A1",
            "refresh_token": "R1",
        });
        let session: Session = serde_json::from_value(json).unwrap();
        assert_eq!(session.access_token, "A1");
        assert_eq!(session.refresh_token, "R1");
        assert_eq!(session.user.email, "staff@example.com");
    }
}
