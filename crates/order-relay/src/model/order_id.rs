use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::Display;

/// Storefront order identifier.
///
/// The platform sends ids as JSON numbers on some events and as strings on
/// others; both land here as text so `1042` and `"1042"` are the same order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub String);

impl From<&str> for OrderId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<u64> for OrderId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireId {
    Number(u64),
    Text(String),
}

/// `deserialize_with` helper for optional ids that may be numbers or strings.
/// Blank strings count as absent.
pub(crate) fn deserialize_optional_id<'de, D>(deserializer: D) -> Result<Option<OrderId>, D::Error>
where
    D: Deserializer<'de>,
{
    let id = Option::<WireId>::deserialize(deserializer)?.and_then(|wire| match wire {
        WireId::Number(n) => Some(OrderId::from(n)),
        WireId::Text(s) if s.trim().is_empty() => None,
        WireId::Text(s) => Some(OrderId(s.trim().to_string())),
    });
    Ok(id)
}
