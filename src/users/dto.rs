use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::users::repo::User;

/// Public part of the user returned to the client.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub bio: Option<String>,
    pub profile_picture: Option<String>,
    pub balance: Decimal,
    pub is_mentor: bool,
    pub created_at: OffsetDateTime,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            bio: user.bio,
            profile_picture: user.profile_picture,
            balance: user.balance,
            is_mentor: user.is_mentor,
            created_at: user.created_at,
        }
    }
}

/// Body for PATCH /users/{id}/balance. `balance` stays optional so an
/// omitted field is a validation error, not a deserialization one.
#[derive(Debug, Deserialize)]
pub struct UpdateBalanceRequest {
    pub balance: Option<Decimal>,
}

#[derive(Debug, Serialize)]
pub struct BalanceResponse {
    pub balance: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_user_is_camel_case_and_hides_nothing_sensitive() {
        let user = PublicUser {
            id: Uuid::new_v4(),
            name: "Grace".into(),
            email: "grace@example.com".into(),
            bio: None,
            profile_picture: None,
            balance: Decimal::ZERO,
            is_mentor: false,
            created_at: OffsetDateTime::now_utc(),
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(json.contains("isMentor"));
        assert!(json.contains("profilePicture"));
        assert!(!json.contains("password"));
    }

    #[test]
    fn balance_may_be_omitted() {
        let req: UpdateBalanceRequest = serde_json::from_str("{}").unwrap();
        assert!(req.balance.is_none());

        let req: UpdateBalanceRequest = serde_json::from_str(r#"{"balance": 12.5}"#).unwrap();
        assert_eq!(req.balance, Some(Decimal::new(125, 1)));
    }
}
