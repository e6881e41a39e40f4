use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub mod account {
    use super::*;

    /// Request body for opening an account.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct AccountNew {
        pub email: String,
        pub name: String,
    }

    /// Request body for a deposit. `amount_cents` must be > 0; the server
    /// rejects anything else.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct DepositNew {
        pub amount_cents: i64,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct Account {
        pub id: i64,
        pub email: String,
        pub name: String,
        /// Balance in integer cents. Authoritative only as of the fetch that
        /// produced this snapshot; the client never computes balances itself.
        pub balance_cents: i64,
        /// Naive UTC timestamp as emitted by the server.
        pub created_at: NaiveDateTime,
    }
}

pub mod card {
    use super::*;

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct Card {
        pub id: i64,
        pub account_id: i64,
        /// Full 16-digit PAN-like number.
        pub card_number: String,
        /// Kept as a string so leading zeros survive (can be "0001").
        pub last4_digits: String,
        /// Opaque token minted by the server at issuance.
        pub token: String,
        pub is_active: bool,
        pub created_at: NaiveDateTime,
    }
}

pub mod transaction {
    use super::*;

    /// Request body for submitting a card transaction.
    ///
    /// `card_id` is required here even though a fetched [`Transaction`] may
    /// carry a null card (the server nulls the reference if the card row is
    /// later removed). `mcc` travels as a 4-character digit string, never a
    /// number.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionNew {
        pub card_id: i64,
        pub merchant: String,
        pub mcc: String,
        pub amount_cents: i64,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct Transaction {
        pub id: i64,
        pub account_id: i64,
        pub card_id: Option<i64>,
        pub amount_cents: i64,
        pub merchant: String,
        pub mcc: String,
        pub is_approved: bool,
        /// Populated if and only if the transaction was declined.
        pub rejection_reason: Option<String>,
        pub created_at: NaiveDateTime,
    }
}

#[cfg(test)]
mod tests {
    use super::transaction::{Transaction, TransactionNew};

    #[test]
    fn mcc_travels_as_string() {
        let req = TransactionNew {
            card_id: 7,
            merchant: "CVS Pharmacy".to_string(),
            mcc: "0042".to_string(),
            amount_cents: 1250,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["mcc"], "0042");
        assert_eq!(json["amount_cents"], 1250);
    }

    #[test]
    fn declined_transaction_carries_reason() {
        let body = r#"{
            "id": 3,
            "account_id": 1,
            "card_id": null,
            "amount_cents": 5000,
            "merchant": "Grocer",
            "mcc": "5411",
            "is_approved": false,
            "rejection_reason": "Non-qualified expense",
            "created_at": "2024-06-01T09:30:00"
        }"#;
        let tx: Transaction = serde_json::from_str(body).unwrap();
        assert!(!tx.is_approved);
        assert_eq!(tx.card_id, None);
        assert_eq!(tx.rejection_reason.as_deref(), Some("Non-qualified expense"));
    }
}
