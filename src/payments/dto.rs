use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::payments::{repo::Payment, status::PaymentStatus};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentRequest {
    pub payer_id: Uuid,
    pub mentor_id: Uuid,
    pub amount: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: PaymentStatus,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
    pub id: Uuid,
    pub payer_id: Uuid,
    pub mentor_id: Uuid,
    pub amount: Decimal,
    pub status: PaymentStatus,
    pub created_at: OffsetDateTime,
}

impl From<Payment> for PaymentResponse {
    fn from(p: Payment) -> Self {
        Self {
            id: p.id,
            payer_id: p.payer_id,
            mentor_id: p.mentor_id,
            amount: p.amount,
            status: p.status,
            created_at: p.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_accepts_fractional_amounts() {
        let req: CreatePaymentRequest = serde_json::from_str(
            r#"{
                "payerId": "7c5c1a5e-9d5b-4a8e-bb0a-cf3e82c45a10",
                "mentorId": "2f1d3b8c-6a4e-4f2a-9d7b-1e8c9a0b2c3d",
                "amount": 0.01
            }"#,
        )
        .unwrap();
        assert_eq!(req.amount, Decimal::new(1, 2));
    }

    #[test]
    fn status_request_parses_lowercase_variants() {
        let req: UpdateStatusRequest = serde_json::from_str(r#"{"status":"completed"}"#).unwrap();
        assert_eq!(req.status, PaymentStatus::Completed);
    }
}
