use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod auth {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct RegisterRequest {
        pub name: String,
        pub email: String,
        pub password: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct LoginRequest {
        pub email: String,
        pub password: String,
    }

    /// Response for both register and login: a signed bearer token.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct TokenResponse {
        pub token: String,
    }
}

pub mod user {
    use super::*;

    /// Public view of a user account. Never carries the password hash.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserView {
        pub id: Uuid,
        pub name: String,
        pub email: String,
        pub role: String,
    }
}

pub mod card {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CardNew {
        pub name: String,
        pub bank: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CardView {
        pub id: Uuid,
        pub name: String,
        pub bank: String,
        pub user_id: Uuid,
    }
}

pub mod expense {
    use super::*;

    fn one() -> u32 {
        1
    }

    /// Request body for creating a purchase, possibly split in installments.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseNew {
        /// Purchase date; shared by every installment of the purchase.
        pub date: DateTime<FixedOffset>,
        pub description: String,
        /// Total amount of the purchase, split evenly across installments.
        pub amount: f64,
        #[serde(default = "one")]
        pub total_installments: u32,
        pub card_id: Uuid,
        pub responsible: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PurchaseCreated {
        pub purchase_id: Uuid,
    }

    /// Query string for `GET /expenses`.
    ///
    /// `year` and `month` are required by the endpoint; they are optional here
    /// so the handler can reject their absence with a clear message instead of
    /// a deserialization failure.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct ExpenseQuery {
        pub year: Option<i32>,
        pub month: Option<u32>,
        pub card_id: Option<Uuid>,
        pub responsible: Option<String>,
    }

    /// Request body for `PUT /expenses/{id}`.
    ///
    /// Only the four mutable fields; installment index, total count, card and
    /// purchase group cannot change.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseUpdate {
        pub description: String,
        pub amount: f64,
        pub date: DateTime<FixedOffset>,
        pub responsible: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseView {
        pub id: Uuid,
        pub description: String,
        pub amount: f64,
        pub date: DateTime<Utc>,
        pub due_date: DateTime<Utc>,
        pub installment: u32,
        pub total_installments: u32,
        pub responsible: String,
        pub purchase_id: Uuid,
        pub card: super::card::CardView,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct SummaryQuery {
        pub year: Option<i32>,
        pub month: Option<u32>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ResponsibleTotal {
        pub responsible: String,
        pub total: f64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CardTotal {
        pub card_id: Uuid,
        pub card_name: String,
        pub total: f64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SummaryResponse {
        pub total: f64,
        pub count: u64,
        pub by_responsible: Vec<ResponsibleTotal>,
        pub by_card: Vec<CardTotal>,
    }
}
