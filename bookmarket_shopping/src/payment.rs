use std::time::Duration;

use crate::api::PaymentMethod;

/// Stand-in for the payment gateway round-trip; authorizes every payment
/// after a fixed delay. The delay is configurable so tests do not wait.
pub struct PaymentAuthorizer {
    delay: Duration,
}

impl PaymentAuthorizer {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub async fn authorize(&self, method: PaymentMethod, amount: f64) -> anyhow::Result<()> {
        tokio::time::sleep(self.delay).await;
        tracing::info!("Authorized payment of {} via {:?}", amount, method);
        Ok(())
    }
}
