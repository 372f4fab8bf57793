use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// A phone number reduced to its digits.
///
/// The storefront delivers numbers the way customers typed them
/// (`+20 155-006-8161`, `(020) 1550068161`); the messaging network only
/// understands the bare digits including the country code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Strips every non-digit. Returns `None` when nothing is left.
    pub fn normalize(raw: &str) -> Option<Self> {
        let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
        if digits.is_empty() {
            None
        } else {
            Some(Self(digits))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// False only for values that bypassed [`PhoneNumber::normalize`], e.g. a
    /// hand-edited snapshot file.
    pub fn is_valid(&self) -> bool {
        !self.0.is_empty() && self.0.chars().all(|c| c.is_ascii_digit())
    }
}

impl Display for PhoneNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_formatting() {
        let phone = PhoneNumber::normalize("+20 155-006-8161").unwrap();
        assert_eq!(phone.as_str(), "201550068161");
        assert!(phone.is_valid());
    }

    #[test]
    fn rejects_numbers_without_digits() {
        assert_eq!(PhoneNumber::normalize(""), None);
        assert_eq!(PhoneNumber::normalize("n/a"), None);
    }
}
