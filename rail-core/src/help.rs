use crate::{BookingError, BookingResult};
use rail_shared::Masked;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Faq {
    pub question: &'static str,
    pub answer: &'static str,
}

pub const FAQS: &[Faq] = &[
    Faq {
        question: "How do I book a train ticket?",
        answer: "To book a ticket, enter your journey details on the home page, select a train from the results, choose your seats, fill in passenger details, and complete the payment.",
    },
    Faq {
        question: "What is the cancellation policy?",
        answer: "Cancellation charges vary based on the time of cancellation. If cancelled more than 48 hours before departure, only a nominal fee is charged. Within 48 hours, cancellation charges increase progressively.",
    },
    Faq {
        question: "How do I check my PNR status?",
        answer: "You can check your PNR status by visiting the 'My Bookings' section and clicking on your booking. The current status will be displayed along with other booking details.",
    },
    Faq {
        question: "Can I modify my booking after confirmation?",
        answer: "Yes, you can modify passenger details like name, age, and berth preference. However, changes to travel date or class may require cancellation and rebooking.",
    },
    Faq {
        question: "What payment methods are accepted?",
        answer: "We accept credit/debit cards, UPI, net banking, and popular digital wallets like Paytm, PhonePe, and Google Pay.",
    },
    Faq {
        question: "Will I get a refund for cancelled tickets?",
        answer: "Yes, refunds are processed after deducting applicable cancellation charges. The amount is typically credited back to your original payment method within 7-10 business days.",
    },
];

/// Case-insensitive substring match against question or answer.
pub fn filter_faqs(query: &str) -> Vec<&'static Faq> {
    let needle = query.to_lowercase();
    FAQS.iter()
        .filter(|faq| {
            faq.question.to_lowercase().contains(&needle)
                || faq.answer.to_lowercase().contains(&needle)
        })
        .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: Masked<String>,
    pub message: String,
}

impl ContactRequest {
    pub fn validate(&self) -> BookingResult<()> {
        let mut missing = Vec::new();
        if self.name.is_empty() {
            missing.push("name".to_string());
        }
        if self.email.is_empty() {
            missing.push("email".to_string());
        }
        if self.message.is_empty() {
            missing.push("message".to_string());
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(BookingError::IncompleteDetails { missing })
        }
    }

    /// There is no support backend; accepted requests are only logged.
    pub fn submit(&self) -> BookingResult<()> {
        self.validate()?;
        tracing::info!(
            name = %self.name,
            email = %self.email,
            message_len = self.message.len(),
            "Support request received"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_returns_all() {
        assert_eq!(filter_faqs("").len(), FAQS.len());
    }

    #[test]
    fn test_matches_question_or_answer_ignoring_case() {
        let hits = filter_faqs("PNR");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].question, "How do I check my PNR status?");

        // Only present in answers
        let hits = filter_faqs("google pay");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].question, "What payment methods are accepted?");

        let hits = filter_faqs("cancel");
        assert_eq!(hits.len(), 3);

        assert!(filter_faqs("baggage").is_empty());
    }

    #[test]
    fn test_contact_request_requires_all_fields() {
        let request = ContactRequest {
            name: "Asha".to_string(),
            email: Masked::from(""),
            message: String::new(),
        };
        match request.submit() {
            Err(BookingError::IncompleteDetails { missing }) => {
                assert_eq!(missing, vec!["email".to_string(), "message".to_string()]);
            }
            other => panic!("unexpected result: {:?}", other),
        }

        let request = ContactRequest {
            name: "Asha".to_string(),
            email: Masked::from("asha@example.com"),
            message: "Refund status?".to_string(),
        };
        assert!(request.submit().is_ok());
    }
}
