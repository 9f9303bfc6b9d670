use serde::{Deserialize, Serialize};
use std::fmt;

/// Payment lifecycle state. A payment starts `Pending` and may move to
/// `Completed` or `Failed`; both of those are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "payment_status", rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
}

impl PaymentStatus {
    pub fn can_transition(self, next: PaymentStatus) -> bool {
        matches!(
            (self, next),
            (PaymentStatus::Pending, PaymentStatus::Completed)
                | (PaymentStatus::Pending, PaymentStatus::Failed)
        )
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Completed => "completed",
            PaymentStatus::Failed => "failed",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::PaymentStatus::*;

    #[test]
    fn pending_moves_forward_only() {
        assert!(Pending.can_transition(Completed));
        assert!(Pending.can_transition(Failed));
        assert!(!Pending.can_transition(Pending));
    }

    #[test]
    fn terminal_states_stay_terminal() {
        for terminal in [Completed, Failed] {
            for next in [Pending, Completed, Failed] {
                assert!(!terminal.can_transition(next));
            }
        }
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Pending).unwrap(), r#""pending""#);
        assert_eq!(serde_json::to_string(&Completed).unwrap(), r#""completed""#);
        assert_eq!(serde_json::to_string(&Failed).unwrap(), r#""failed""#);
    }
}
