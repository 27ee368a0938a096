//! Collaborator contracts consumed by the screen controller

use crate::core::error::Result;
use crate::store::PhotoReference;
use async_trait::async_trait;

/// Produces at most one photo per invocation (camera capture or gallery pick)
///
/// `Ok(None)` means the user backed out. Failures are reported as
/// `PermissionDenied` or `CaptureFailed`, never as a cancellation.
#[async_trait]
pub trait PhotoSource: Send + Sync {
    /// Capture or pick one photo
    async fn acquire(&self) -> Result<Option<PhotoReference>>;

    /// Short name used in log lines
    fn source_name(&self) -> &'static str;
}

/// Outcome of asking the user to confirm a destructive action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    /// Go ahead
    Confirmed,
    /// Leave everything as it is
    Cancelled,
}

impl Confirmation {
    /// Check if the user confirmed
    pub fn is_confirmed(&self) -> bool {
        matches!(self, Confirmation::Confirmed)
    }
}

impl From<bool> for Confirmation {
    fn from(confirmed: bool) -> Self {
        if confirmed {
            Confirmation::Confirmed
        } else {
            Confirmation::Cancelled
        }
    }
}

/// Asks the user whether a photo should really be removed
pub trait RemovalConfirmer: Send + Sync {
    /// Present the question and return exactly one of the two outcomes
    fn confirm(&self, photo: &PhotoReference) -> Result<Confirmation>;
}
