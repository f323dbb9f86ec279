//! Bearer management errors

use thiserror::Error;

use crate::ids::ErabId;

/// Kind of identifier rejected by [`BearerError::InvalidIdentifier`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierKind {
    /// Signalling radio bearer id
    Srb,
    /// E-RAB id
    Erab,
}

impl std::fmt::Display for IdentifierKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IdentifierKind::Srb => write!(f, "SRB"),
            IdentifierKind::Erab => write!(f, "E-RAB"),
        }
    }
}

/// Errors raised by bearer setup, release and reconfiguration
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BearerError {
    /// SRB or E-RAB id outside its valid domain
    #[error("invalid {kind} id={id}")]
    InvalidIdentifier {
        /// Identifier kind
        kind: IdentifierKind,
        /// Rejected value
        id: u8,
    },

    /// QCI outside the table or without a provisioned profile
    #[error("QCI={qci} not configured")]
    UnconfiguredQosClass {
        /// Requested QCI
        qci: u8,
    },

    /// Transport address longer than 32 bits
    #[error("only transport addresses with length <= 32 are supported, got {bits} bits")]
    UnsupportedAddressLength {
        /// Address length in bits
        bits: usize,
    },

    /// Release of an E-RAB the subscriber does not hold
    #[error("rnti=0x{rnti:x} does not contain E-RAB id={erab_id}")]
    UnknownBearer {
        /// Subscriber RNTI
        rnti: u16,
        /// Requested E-RAB id
        erab_id: ErabId,
    },

    /// Operation the bearer handler does not implement
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),
}
