//! Bridge-level error type.

use termview_common::SurfaceError;
use thiserror::Error;

use crate::envelope::EnvelopeError;

#[derive(Debug, Error)]
pub enum BridgeError {
    /// The embedded surface could not be created or navigated.
    #[error("surface initialization failed: {0}")]
    Initialization(#[from] SurfaceError),

    #[error("envelope decode failed: {0}")]
    Envelope(#[from] EnvelopeError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initialization_error_carries_surface_description() {
        let err: BridgeError = SurfaceError::Navigation("404 for index.html".into()).into();
        assert!(err.to_string().contains("404 for index.html"));
        assert!(matches!(err, BridgeError::Initialization(_)));
    }

    #[test]
    fn envelope_error_converts() {
        let err: BridgeError = EnvelopeError::MissingData { kind: "input" }.into();
        assert!(matches!(err, BridgeError::Envelope(_)));
    }
}
