//! Supported bank enumeration and provider label mapping
//!
//! SePay reports the issuing bank as a free-form label whose spelling
//! varies between records ("MB Bank", "MBBANK", full legal name). We only
//! accept labels that are explicitly registered here; anything else is an
//! error rather than a guess, since misclassifying bank identity corrupts
//! downstream reporting. Lookup is exact-string and case-sensitive.

use serde::{Deserialize, Serialize};

use crate::domain::result::{Error, Result};

/// Closed set of banks the system recognizes
///
/// Extend by adding a variant and its label spellings to
/// `from_provider_label`; never by inferring from unknown input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SupportedBank {
    #[serde(rename = "MBBANK")]
    MbBank,
    Vietcombank,
    Techcombank,
    Acb,
    Bidv,
    Vietinbank,
}

impl SupportedBank {
    /// Map a SePay bank label to a supported bank
    ///
    /// Fails with [`Error::UnsupportedBank`] for any unregistered label.
    pub fn from_provider_label(label: &str) -> Result<Self> {
        match label {
            "MB Bank" | "MBBANK" | "MBBank" | "Military Commercial Joint Stock Bank" => {
                Ok(Self::MbBank)
            }
            "Vietcombank"
            | "VietComBank"
            | "Joint Stock Commercial Bank for Foreign Trade of Vietnam" => Ok(Self::Vietcombank),
            "Techcombank"
            | "TechComBank"
            | "Vietnam Technological and Commercial Joint Stock Bank" => Ok(Self::Techcombank),
            "ACB" | "Asia Commercial Bank" => Ok(Self::Acb),
            "BIDV" | "Bank for Investment and Development of Vietnam" => Ok(Self::Bidv),
            "VietinBank"
            | "VIETINBANK"
            | "Vietnam Joint Stock Commercial Bank for Industry and Trade" => Ok(Self::Vietinbank),
            other => Err(Error::UnsupportedBank(other.to_string())),
        }
    }

    /// Canonical identifier for display and serialization
    pub fn as_str(&self) -> &'static str {
        match self {
            SupportedBank::MbBank => "MBBANK",
            SupportedBank::Vietcombank => "VIETCOMBANK",
            SupportedBank::Techcombank => "TECHCOMBANK",
            SupportedBank::Acb => "ACB",
            SupportedBank::Bidv => "BIDV",
            SupportedBank::Vietinbank => "VIETINBANK",
        }
    }
}

impl std::fmt::Display for SupportedBank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registered_labels_map() {
        let cases = [
            ("MB Bank", SupportedBank::MbBank),
            ("MBBANK", SupportedBank::MbBank),
            ("MBBank", SupportedBank::MbBank),
            (
                "Military Commercial Joint Stock Bank",
                SupportedBank::MbBank,
            ),
            ("Vietcombank", SupportedBank::Vietcombank),
            (
                "Joint Stock Commercial Bank for Foreign Trade of Vietnam",
                SupportedBank::Vietcombank,
            ),
            ("Techcombank", SupportedBank::Techcombank),
            ("ACB", SupportedBank::Acb),
            ("Asia Commercial Bank", SupportedBank::Acb),
            ("BIDV", SupportedBank::Bidv),
            ("VietinBank", SupportedBank::Vietinbank),
        ];
        for (label, expected) in cases {
            assert_eq!(
                SupportedBank::from_provider_label(label).unwrap(),
                expected,
                "label {:?}",
                label
            );
        }
    }

    #[test]
    fn test_unregistered_label_fails() {
        let result = SupportedBank::from_provider_label("Some Unknown Bank");
        match result {
            Err(Error::UnsupportedBank(label)) => assert_eq!(label, "Some Unknown Bank"),
            other => panic!("expected UnsupportedBank, got {:?}", other),
        }
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        // "mb bank" is not a registered spelling, even though "MB Bank" is
        assert!(SupportedBank::from_provider_label("mb bank").is_err());
        assert!(SupportedBank::from_provider_label("acb").is_err());
    }

    #[test]
    fn test_empty_label_fails() {
        assert!(SupportedBank::from_provider_label("").is_err());
    }

    #[test]
    fn test_display_uses_canonical_name() {
        assert_eq!(SupportedBank::MbBank.to_string(), "MBBANK");
        assert_eq!(SupportedBank::Bidv.to_string(), "BIDV");
    }
}
