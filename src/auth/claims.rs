use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT payload presented on every authenticated request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,     // user email
    pub id: Uuid,        // user ID
    pub role: String,    // fixed authorization role
    pub bio: String,
    pub picture: String,
    pub balance: String, // snapshot at issuance; not refreshed afterwards
    pub jti: Uuid,       // unique token ID
    pub iat: usize,      // issued at (unix timestamp)
    pub exp: usize,      // expires at (unix timestamp)
    pub iss: String,     // issuer
    pub aud: String,     // audience
}
