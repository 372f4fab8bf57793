//! [`RecordEntity`] implementation for [`CustomerPhone`].

use super::CustomerError;
use crate::model::{CustomerPhone, CustomerPhoneDraft, OrderId};
use record_actor::RecordEntity;

impl RecordEntity for CustomerPhone {
    type Key = OrderId;
    type Draft = CustomerPhoneDraft;
    type Error = CustomerError;

    fn from_draft(order_id: OrderId, draft: CustomerPhoneDraft) -> Result<Self, Self::Error> {
        if order_id.0.is_empty() {
            return Err(CustomerError::InvalidRecord("empty order id".into()));
        }
        if !draft.phone.is_valid() {
            return Err(CustomerError::InvalidRecord(format!(
                "phone {:?} is not digits-only",
                draft.phone.as_str()
            )));
        }
        Ok(Self {
            order_id,
            phone: draft.phone,
            name: draft.name.trim().to_string(),
            stored_at: draft.stored_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PhoneNumber;

    #[test]
    fn trims_name_and_keeps_phone() {
        let phone = PhoneNumber::normalize("201550068161").unwrap();
        let draft = CustomerPhoneDraft::now(phone.clone(), " Mona ");
        let record = CustomerPhone::from_draft(OrderId::from(7), draft).unwrap();
        assert_eq!(record.name, "Mona");
        assert_eq!(record.phone, phone);
    }

    #[test]
    fn rejects_malformed_phone() {
        let phone: PhoneNumber = serde_json::from_str(r#""+20 x""#).unwrap();
        let draft = CustomerPhoneDraft::now(phone, "Mona");
        let result = CustomerPhone::from_draft(OrderId::from(7), draft);
        assert!(matches!(result, Err(CustomerError::InvalidRecord(_))));
    }
}
