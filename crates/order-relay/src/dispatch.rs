//! # Dispatcher
//!
//! Runs one webhook event through the customer store, the message composer
//! and the gateway, then appends it to the webhook log.
//!
//! | Event | Store | Messages |
//! |---|---|---|
//! | order placed | remember phone (first write wins) | customer, then every owner |
//! | shipment updated | read phone when the payload lacks it | customer |
//! | order canceled | forget phone | every owner |
//!
//! Owner notices are best effort: a failure is logged and counted, and only a
//! cancellation that reaches no owner at all fails the event.
//!
//! With duplicate suppression on, the signature is reserved in the log before
//! anything is sent and released again if the delivery fails.

use crate::clients::{CustomerClient, WebhookLogClient};
use crate::compose;
use crate::customer_actor::CustomerError;
use crate::gateway::{GatewayError, MessagingGateway, RecipientId};
use crate::model::{
    CustomerPhoneDraft, EventKind, OrderId, PhoneNumber, WebhookEvent, WebhookSignature,
};
use crate::webhook_log_actor::WebhookLogError;
use chrono::Utc;
use record_actor::{Inserted, StoreClient};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, instrument, warn};

#[derive(Debug, Clone, Default)]
pub struct DispatchSettings {
    /// Store owners notified about new and canceled orders.
    pub owners: Vec<PhoneNumber>,
    /// Acknowledge already-logged deliveries without side effects.
    pub dedupe: bool,
}

/// What one successfully dispatched event did.
#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryReport {
    pub kind: EventKind,
    pub order_id: Option<OrderId>,
    /// Set when the customer was messaged.
    pub customer: Option<RecipientId>,
    pub owners_notified: usize,
    pub owners_failed: usize,
}

impl DeliveryReport {
    fn new(kind: EventKind, order_id: Option<&OrderId>) -> Self {
        Self {
            kind,
            order_id: order_id.cloned(),
            customer: None,
            owners_notified: 0,
            owners_failed: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DispatchOutcome {
    Sent(DeliveryReport),
    /// Signature already in the webhook log; nothing was done.
    Duplicate,
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum DispatchError {
    #[error("Invalid webhook payload: {0}")]
    InvalidPayload(String),

    #[error("Number not found on WhatsApp: {0}")]
    RecipientNotFound(PhoneNumber),

    /// Shipment update for an order with no phone in the payload or the store.
    #[error("Unknown order: {0}")]
    UnknownOrder(String),

    #[error(transparent)]
    Customer(#[from] CustomerError),

    #[error(transparent)]
    WebhookLog(#[from] WebhookLogError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error("No store owner could be notified")]
    NoOwnerReached,
}

/// Order id as it appears in logs and signatures, `-` when absent.
pub fn order_label(order_id: Option<&OrderId>) -> String {
    order_id.map_or_else(|| "-".to_string(), ToString::to_string)
}

#[derive(Clone)]
pub struct Dispatcher {
    customers: CustomerClient,
    webhook_log: WebhookLogClient,
    gateway: Arc<dyn MessagingGateway>,
    settings: Arc<DispatchSettings>,
}

impl Dispatcher {
    pub fn new(
        customers: CustomerClient,
        webhook_log: WebhookLogClient,
        gateway: Arc<dyn MessagingGateway>,
        settings: DispatchSettings,
    ) -> Self {
        Self {
            customers,
            webhook_log,
            gateway,
            settings: Arc::new(settings),
        }
    }

    pub fn settings(&self) -> &DispatchSettings {
        &self.settings
    }

    #[instrument(
        skip(self, event),
        fields(event = %event.kind, order_id = %order_label(event.order_id()))
    )]
    pub async fn handle(&self, event: WebhookEvent) -> Result<DispatchOutcome, DispatchError> {
        let signature = event.signature(Utc::now());

        // The insert is atomic in the log actor, so a concurrent retry of the
        // same delivery sees the reservation and backs off.
        if self.settings.dedupe && !self.webhook_log.append(signature.clone(), Utc::now()).await? {
            info!(%signature, "Duplicate webhook ignored");
            return Ok(DispatchOutcome::Duplicate);
        }

        let result = match event.kind {
            EventKind::OrderPlaced => self.order_placed(&event).await,
            EventKind::ShipmentUpdated => self.shipment_updated(&event).await,
            EventKind::OrderCanceled => self.order_canceled(&event).await,
        };

        let report = match result {
            Ok(report) => report,
            Err(e) => {
                error!(error = %e, "Dispatch failed");
                if self.settings.dedupe {
                    self.release(signature).await;
                }
                return Err(e);
            }
        };

        if !self.settings.dedupe {
            // Messages are already out; a log failure must not turn into a retry.
            match self.webhook_log.append(signature.clone(), Utc::now()).await {
                Ok(true) => debug!(%signature, "Webhook logged"),
                Ok(false) => debug!(%signature, "Webhook already logged"),
                Err(e) => warn!(%signature, error = %e, "Failed to log webhook"),
            }
        }

        info!(
            owners_notified = report.owners_notified,
            owners_failed = report.owners_failed,
            "Webhook dispatched"
        );
        Ok(DispatchOutcome::Sent(report))
    }

    async fn order_placed(&self, event: &WebhookEvent) -> Result<DeliveryReport, DispatchError> {
        let raw_phone = event
            .order
            .shipping_phone()
            .ok_or_else(|| DispatchError::InvalidPayload("missing shipping phone".into()))?;
        let phone = PhoneNumber::normalize(raw_phone).ok_or_else(|| {
            DispatchError::InvalidPayload(format!("shipping phone {raw_phone:?} has no digits"))
        })?;
        let name = event.order.customer_name();

        // Resolve first: an unreachable number must not become the stored phone.
        let mut report = DeliveryReport::new(event.kind, event.order_id());
        let to = self.resolve_customer(&phone).await?;

        match event.order_id() {
            Some(order_id) => {
                let draft = CustomerPhoneDraft::now(phone.clone(), name.unwrap_or_default());
                match self.customers.remember(order_id.clone(), draft).await? {
                    Inserted::Created(_) => debug!("Customer phone stored"),
                    Inserted::Existing(kept) => {
                        info!(phone = %kept.phone, "Order already on file, keeping stored phone")
                    }
                }
            }
            None => warn!("Order has no id, customer phone not stored"),
        }

        self.gateway
            .send_message(&to, &compose::order_placed_customer(name))
            .await?;
        report.customer = Some(to);

        let notice = compose::order_placed_owner(event.order_id(), name, &phone);
        self.notify_owners(&notice, &mut report).await;
        Ok(report)
    }

    async fn shipment_updated(&self, event: &WebhookEvent) -> Result<DeliveryReport, DispatchError> {
        let mut phone = event.order.shipping_phone().and_then(PhoneNumber::normalize);
        let mut name = event.order.customer_name().map(str::to_string);

        if phone.is_none() || name.is_none() {
            if let Some(order_id) = event.order_id() {
                if let Some(stored) = self.customers.get(order_id.clone()).await? {
                    debug!("Filling shipment recipient from stored order");
                    phone = phone.or(Some(stored.phone));
                    name = name.or(Some(stored.name).filter(|n| !n.is_empty()));
                }
            }
        }

        let phone =
            phone.ok_or_else(|| DispatchError::UnknownOrder(order_label(event.order_id())))?;

        let mut report = DeliveryReport::new(event.kind, event.order_id());
        let to = self.resolve_customer(&phone).await?;
        let text = compose::shipment_updated(name.as_deref(), event.order.shipment.as_ref());
        self.gateway.send_message(&to, &text).await?;
        report.customer = Some(to);
        Ok(report)
    }

    async fn order_canceled(&self, event: &WebhookEvent) -> Result<DeliveryReport, DispatchError> {
        let removed = match event.order_id() {
            Some(order_id) => self.customers.remove(order_id.clone()).await?,
            None => None,
        };
        if removed.is_some() {
            debug!("Customer phone forgotten");
        }

        let name = event
            .order
            .customer_name()
            .map(str::to_string)
            .or_else(|| removed.map(|r| r.name).filter(|n| !n.is_empty()));

        let mut report = DeliveryReport::new(event.kind, event.order_id());
        let notice = compose::order_canceled_owner(event.order_id(), name.as_deref());
        self.notify_owners(&notice, &mut report).await;

        if report.owners_notified == 0 {
            return Err(DispatchError::NoOwnerReached);
        }
        Ok(report)
    }

    /// Drops the log reservation of a failed delivery so the platform's
    /// retry is dispatched again.
    async fn release(&self, signature: WebhookSignature) {
        if let Err(e) = self.webhook_log.remove(signature.clone()).await {
            warn!(%signature, error = %e, "Failed to release webhook reservation");
        }
    }

    async fn resolve_customer(&self, phone: &PhoneNumber) -> Result<RecipientId, DispatchError> {
        self.gateway
            .resolve_recipient(phone)
            .await?
            .ok_or_else(|| DispatchError::RecipientNotFound(phone.clone()))
    }

    async fn notify_owners(&self, text: &str, report: &mut DeliveryReport) {
        for owner in &self.settings.owners {
            match self.notify_owner(owner, text).await {
                Ok(()) => report.owners_notified += 1,
                Err(e) => {
                    warn!(owner = %owner, error = %e, "Failed to notify store owner");
                    report.owners_failed += 1;
                }
            }
        }
    }

    async fn notify_owner(&self, owner: &PhoneNumber, text: &str) -> Result<(), DispatchError> {
        let to = self
            .gateway
            .resolve_recipient(owner)
            .await?
            .ok_or_else(|| DispatchError::RecipientNotFound(owner.clone()))?;
        self.gateway.send_message(&to, text).await?;
        Ok(())
    }
}
