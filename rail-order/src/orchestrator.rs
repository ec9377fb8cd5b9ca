use rail_core::payment::{PaymentAdapter, PaymentError, PaymentRequest, PaymentStatus};
use rail_core::{BookingError, BookingResult};
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;

const PNR_PREFIX: &str = "PNR";
const PNR_LEN: usize = 9;
const PNR_CHARSET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// `PNR` followed by nine characters from `[0-9A-Z]`. Uniqueness against
/// earlier bookings is not checked.
pub fn generate_pnr<R: Rng + ?Sized>(rng: &mut R) -> String {
    let token: String = (0..PNR_LEN)
        .map(|_| PNR_CHARSET[rng.gen_range(0..PNR_CHARSET.len())] as char)
        .collect();
    format!("{}{}", PNR_PREFIX, token)
}

pub struct PaymentOrchestrator {
    adapter: Arc<dyn PaymentAdapter>,
}

impl PaymentOrchestrator {
    pub fn new(adapter: Arc<dyn PaymentAdapter>) -> Self {
        Self { adapter }
    }

    /// Charge the request and issue a PNR on success.
    pub async fn charge(&self, request: &PaymentRequest) -> BookingResult<String> {
        tracing::info!(
            reference = %request.reference,
            amount = request.amount,
            method = %request.method.label(),
            "Processing payment"
        );

        let status = self
            .adapter
            .process_payment(request)
            .await
            .map_err(|e| BookingError::PaymentFailed(e.to_string()))?;

        if status != PaymentStatus::Succeeded {
            tracing::warn!(reference = %request.reference, ?status, "Payment not completed");
            return Err(BookingError::PaymentFailed(format!("gateway returned {:?}", status)));
        }

        Ok(generate_pnr(&mut rand::thread_rng()))
    }
}

/// Stand-in gateway: waits, then approves.
pub struct MockPaymentAdapter {
    delay: Duration,
    decline: bool,
}

impl MockPaymentAdapter {
    pub fn new(delay: Duration) -> Self {
        Self { delay, decline: false }
    }

    pub fn declining(delay: Duration) -> Self {
        Self { delay, decline: true }
    }
}

#[async_trait::async_trait]
impl PaymentAdapter for MockPaymentAdapter {
    async fn process_payment(&self, request: &PaymentRequest) -> Result<PaymentStatus, PaymentError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if self.decline {
            return Err(PaymentError::Declined(format!("reference {}", request.reference)));
        }
        Ok(PaymentStatus::Succeeded)
    }
}
