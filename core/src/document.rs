//! Persisted configuration document.
//!
//! The document is a JSON object with one section per pool:
//!
//! ```json
//! {
//!   "normal": {
//!     "totalTickets": 100,
//!     "ticketReleaseRate": 5,
//!     "customerRetrievalRate": 3,
//!     "maxTicketCapacity": 20
//!   },
//!   "vip": { ... }
//! }
//! ```
//!
//! Parsing looks every field up explicitly so that a missing value is
//! reported by name. A document either parses completely or not at all.

use crate::config::PoolConfig;
use crate::pool::PoolKind;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Errors reading a persisted configuration document.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The text is not valid JSON
    #[error("Malformed configuration document: {0}")]
    Json(#[from] serde_json::Error),

    /// A pool section is absent
    #[error("Cannot find section \"{section}\"")]
    MissingSection {
        /// Section key
        section: &'static str,
    },

    /// A field is absent from a pool section
    #[error("Cannot find value for \"{field}\" in section \"{section}\"")]
    MissingField {
        /// Section key
        section: &'static str,
        /// Field name
        field: &'static str,
    },

    /// A field holds something other than a non-negative 32-bit integer
    #[error("Value for \"{field}\" in section \"{section}\" is not a non-negative integer")]
    InvalidField {
        /// Section key
        section: &'static str,
        /// Field name
        field: &'static str,
    },
}

/// Configuration of both pools as written to disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ConfigDocument {
    /// Normal pool section
    pub normal: PoolConfig,
    /// VIP pool section
    pub vip: PoolConfig,
}

impl ConfigDocument {
    /// Build a document from the two sections.
    #[must_use]
    pub const fn new(normal: PoolConfig, vip: PoolConfig) -> Self {
        Self { normal, vip }
    }

    /// The section belonging to `kind`.
    #[must_use]
    pub const fn section(&self, kind: PoolKind) -> PoolConfig {
        match kind {
            PoolKind::Normal => self.normal,
            PoolKind::Vip => self.vip,
        }
    }

    /// Render as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a document, requiring every section and field.
    ///
    /// # Errors
    ///
    /// - [`DocumentError::Json`] if the text is not JSON
    /// - [`DocumentError::MissingSection`] / [`DocumentError::MissingField`] for absent values
    /// - [`DocumentError::InvalidField`] for values that are not `u32`
    pub fn from_json(text: &str) -> Result<Self, DocumentError> {
        let root: Value = serde_json::from_str(text)?;

        Ok(Self {
            normal: parse_section(&root, PoolKind::Normal)?,
            vip: parse_section(&root, PoolKind::Vip)?,
        })
    }
}

fn parse_section(root: &Value, kind: PoolKind) -> Result<PoolConfig, DocumentError> {
    let section = kind.section_key();
    let body = root
        .get(section)
        .ok_or(DocumentError::MissingSection { section })?;

    let mut values = [0_u32; 4];
    for (slot, field) in values.iter_mut().zip(PoolConfig::FIELD_NAMES) {
        let raw = body
            .get(field)
            .ok_or(DocumentError::MissingField { section, field })?;
        *slot = raw
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .ok_or(DocumentError::InvalidField { section, field })?;
    }

    let [total, release, retrieval, capacity] = values;
    Ok(PoolConfig::new(total, release, retrieval, capacity))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ConfigDocument {
        ConfigDocument::new(PoolConfig::new(100, 5, 3, 20), PoolConfig::new(10, 1, 2, 4))
    }

    #[test]
    fn round_trip_preserves_both_sections() {
        let text = sample().to_json();
        assert!(text.is_ok());
        let parsed = text.and_then(|t| ConfigDocument::from_json(&t));
        assert_eq!(parsed.ok(), Some(sample()));
    }

    #[test]
    fn written_document_uses_section_and_field_names() {
        let text = sample().to_json().unwrap_or_default();
        for key in ["\"normal\"", "\"vip\"", "\"totalTickets\"", "\"maxTicketCapacity\""] {
            assert!(text.contains(key), "missing {key} in {text}");
        }
    }

    #[test]
    fn missing_field_is_reported_by_name() {
        let text = r#"{
            "normal": {"totalTickets": 1, "ticketReleaseRate": 1, "customerRetrievalRate": 1, "maxTicketCapacity": 1},
            "vip": {"totalTickets": 1, "ticketReleaseRate": 1, "maxTicketCapacity": 1}
        }"#;

        let err = ConfigDocument::from_json(text);
        assert!(matches!(
            err,
            Err(DocumentError::MissingField {
                section: "vip",
                field: "customerRetrievalRate"
            })
        ));
    }

    #[test]
    fn missing_section_is_reported() {
        let text = r#"{"normal": {"totalTickets": 1, "ticketReleaseRate": 1, "customerRetrievalRate": 1, "maxTicketCapacity": 1}}"#;
        assert!(matches!(
            ConfigDocument::from_json(text),
            Err(DocumentError::MissingSection { section: "vip" })
        ));
    }

    #[test]
    fn negative_and_fractional_values_are_invalid() {
        for bad in ["-1", "2.5", "\"7\"", "4294967296"] {
            let text = format!(
                r#"{{"normal": {{"totalTickets": {bad}, "ticketReleaseRate": 1, "customerRetrievalRate": 1, "maxTicketCapacity": 1}}, "vip": {{}}}}"#
            );
            assert!(
                matches!(
                    ConfigDocument::from_json(&text),
                    Err(DocumentError::InvalidField {
                        section: "normal",
                        field: "totalTickets"
                    })
                ),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn garbage_is_a_json_error() {
        assert!(matches!(
            ConfigDocument::from_json("normal = 5"),
            Err(DocumentError::Json(_))
        ));
    }
}
