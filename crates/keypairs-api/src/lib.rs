// ABOUTME: Boundary surface of the keypairs service, independent of any HTTP framework.
// ABOUTME: Decodes request envelopes, renders JSON or XML bodies, and classifies failures.

pub mod controller;
pub mod envelope;
pub mod error;
pub mod fault;
pub mod xml;

pub use controller::{ApiResponse, KeypairsController};
pub use envelope::{CreateKeypairBody, KeypairEnvelope, KeypairView, KeypairsEnvelope};
pub use error::ApiError;
pub use fault::{Fault, FaultKind};

/// Body representation chosen by the caller's content negotiation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Json,
    Xml,
}

impl Format {
    pub fn content_type(&self) -> &'static str {
        match self {
            Format::Json => "application/json",
            Format::Xml => "application/xml",
        }
    }
}
