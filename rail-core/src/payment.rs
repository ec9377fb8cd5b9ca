use async_trait::async_trait;
use rail_shared::Masked;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Processing,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Wallet {
    Paytm,
    PhonePe,
    GooglePay,
    AmazonPay,
}

impl Wallet {
    pub fn display_name(&self) -> &'static str {
        match self {
            Wallet::Paytm => "Paytm",
            Wallet::PhonePe => "PhonePe",
            Wallet::GooglePay => "Google Pay",
            Wallet::AmazonPay => "Amazon Pay",
        }
    }
}

/// How the traveller chose to pay. Field contents are passed through
/// unchecked; the gateway is a stand-in.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "lowercase")]
pub enum PaymentMethod {
    Card {
        number: Masked<String>,
        expiry: String,
        cvv: Masked<String>,
    },
    Upi {
        vpa: Masked<String>,
    },
    Wallet {
        wallet: Wallet,
    },
}

impl PaymentMethod {
    /// Short label for receipts, e.g. "card ending 4242".
    pub fn label(&self) -> String {
        match self {
            PaymentMethod::Card { number, .. } => {
                let digits: Vec<char> = number
                    .expose()
                    .chars()
                    .filter(|c| c.is_ascii_digit())
                    .collect();
                if digits.len() >= 4 {
                    let last: String = digits[digits.len() - 4..].iter().collect();
                    format!("card ending {}", last)
                } else {
                    "card".to_string()
                }
            }
            PaymentMethod::Upi { .. } => "UPI".to_string(),
            PaymentMethod::Wallet { wallet } => wallet.display_name().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRequest {
    pub reference: Uuid,
    pub amount: i64,
    pub currency: String,
    pub method: PaymentMethod,
}

#[derive(Debug, thiserror::Error)]
pub enum PaymentError {
    #[error("Payment declined: {0}")]
    Declined(String),
    #[error("Payment gateway unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait PaymentAdapter: Send + Sync {
    /// Charge the request. Dropping the returned future abandons the attempt
    /// without side effects.
    async fn process_payment(&self, request: &PaymentRequest) -> Result<PaymentStatus, PaymentError>;
}
