//! Error types for ENI resolution

use eniconf_metadata::MetadataError;
use thiserror::Error;

use crate::field::EniField;

/// Error type for ENI resolution
#[derive(Debug, Error)]
pub enum ResolveError {
    /// No attached interface carries the requested ID
    #[error("eni id {id}: not found")]
    NotFound { id: String },

    /// A metadata lookup for one attribute of one interface failed
    #[error("failed to get eni {field} for mac {mac}")]
    Source {
        field: EniField,
        mac: String,
        #[source]
        source: MetadataError,
    },

    /// Listing the attached interfaces failed
    #[error("failed to list attached eni macs")]
    AttachedMacs(#[source] MetadataError),
}

impl ResolveError {
    pub(crate) fn lookup(field: EniField, mac: &str) -> impl FnOnce(MetadataError) -> Self + '_ {
        move |source| ResolveError::Source {
            field,
            mac: mac.to_string(),
            source,
        }
    }

    /// The attribute whose lookup failed
    pub fn field(&self) -> Option<EniField> {
        match self {
            ResolveError::Source { field, .. } => Some(*field),
            ResolveError::AttachedMacs(_) => Some(EniField::AttachedMacs),
            ResolveError::NotFound { .. } => None,
        }
    }

    /// The interface whose lookup failed
    pub fn mac(&self) -> Option<&str> {
        match self {
            ResolveError::Source { mac, .. } => Some(mac),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ResolveError::NotFound { .. })
    }
}

/// Result type for ENI resolution
pub type Result<T> = std::result::Result<T, ResolveError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_error_display() {
        let err = ResolveError::NotFound {
            id: "eni-999".to_string(),
        };
        assert_eq!(err.to_string(), "eni id eni-999: not found");
        assert!(err.is_not_found());
        assert!(err.field().is_none());

        let err = ResolveError::Source {
            field: EniField::Ipv6Gateway,
            mac: "m2".to_string(),
            source: MetadataError::NotFound("network/interfaces/macs/m2/ipv6-gateway".to_string()),
        };
        assert_eq!(err.to_string(), "failed to get eni ipv6 gateway for mac m2");
        assert_eq!(err.field(), Some(EniField::Ipv6Gateway));
        assert_eq!(err.mac(), Some("m2"));
        assert_eq!(
            err.source().unwrap().to_string(),
            "metadata not found: network/interfaces/macs/m2/ipv6-gateway"
        );
    }

    #[test]
    fn test_attached_macs_error() {
        let err = ResolveError::AttachedMacs(MetadataError::Status {
            path: "network/interfaces/macs/".to_string(),
            status: 503,
        });
        assert_eq!(err.field(), Some(EniField::AttachedMacs));
        assert!(err.mac().is_none());
        assert!(!err.is_not_found());
    }
}
