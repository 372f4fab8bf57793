//! # Customer Client
//!
//! High-level API over the customer phone store.
use crate::customer_actor::CustomerError;
use crate::model::{CustomerPhone, CustomerPhoneDraft, OrderId};
use async_trait::async_trait;
use record_actor::{Inserted, RecordClient, StoreClient, StoreError};
use tracing::{debug, instrument};

/// Client for the customer phone store.
#[derive(Clone)]
pub struct CustomerClient {
    inner: RecordClient<CustomerPhone>,
}

impl CustomerClient {
    pub fn new(inner: RecordClient<CustomerPhone>) -> Self {
        Self { inner }
    }

    /// Records which customer an order belongs to. First write wins: an order
    /// already on file comes back as [`Inserted::Existing`].
    #[instrument(skip(self, draft), fields(phone = %draft.phone))]
    pub async fn remember(
        &self,
        order_id: OrderId,
        draft: CustomerPhoneDraft,
    ) -> Result<Inserted<CustomerPhone>, CustomerError> {
        debug!("Sending request");
        self.inner
            .insert(order_id, draft)
            .await
            .map_err(Self::map_error)
    }
}

#[async_trait]
impl StoreClient<CustomerPhone> for CustomerClient {
    type Error = CustomerError;

    fn inner(&self) -> &RecordClient<CustomerPhone> {
        &self.inner
    }

    fn map_error(e: StoreError) -> Self::Error {
        match e {
            StoreError::Entity(inner) => match inner.downcast::<CustomerError>() {
                Ok(customer_error) => *customer_error,
                Err(other) => CustomerError::InvalidRecord(other.to_string()),
            },
            other => CustomerError::ActorCommunicationError(other.to_string()),
        }
    }
}
