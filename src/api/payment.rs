//! MoMo payment initiation.

use serde_json::{json, Value};

use crate::api::endpoints;
use crate::api::types::MomoPayment;
use crate::api::{report, send, ApiError};
use crate::clients::{HttpClient, HttpMethod, HttpRequest, ResponseEnvelope};
use crate::ui::LoadingGuard;

/// Payment operations.
///
/// # Example
///
/// ```rust,ignore
/// let payment = store.payments().create_momo(150_000, "Order #1042").await?;
/// if let Some(url) = payment.pay_url {
///     println!("Pay at {url}");
/// }
/// ```
#[derive(Clone, Copy, Debug)]
pub struct PaymentApi<'a> {
    client: &'a HttpClient,
}

impl<'a> PaymentApi<'a> {
    pub(crate) const fn new(client: &'a HttpClient) -> Self {
        Self { client }
    }

    /// Creates a MoMo payment for `amount` (VND) and returns its links.
    ///
    /// The loading indicator is shown while the request is in flight.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the backend refuses, or
    /// [`ApiError::Decode`] if the payload is not a payment.
    pub async fn create_momo(
        &self,
        amount: u64,
        order_info: &str,
    ) -> Result<MomoPayment, ApiError> {
        let result = {
            let _loading = LoadingGuard::show(self.client.ui());
            send(
                self.client,
                HttpRequest::builder(HttpMethod::Post, endpoints::payment::MOMO_CREATE)
                    .json(json!({ "amount": amount, "orderInfo": order_info })),
            )
            .await
        };

        let result = result.and_then(|envelope| {
            envelope
                .into_data::<MomoPayment>()
                .map_err(|e| ApiError::decode("MoMo payment", e))
        });
        report(self.client.ui(), result, None)
    }

    /// Forwards a MoMo instant payment notification to the backend.
    ///
    /// Sent without the bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the backend rejects the notification.
    pub async fn handle_momo_ipn(&self, notification: Value) -> Result<ResponseEnvelope, ApiError> {
        send(
            self.client,
            HttpRequest::builder(HttpMethod::Post, endpoints::payment::MOMO_IPN)
                .json(notification)
                .requires_auth(false),
        )
        .await
    }
}
