//! Share messages and the host share capability.

use gstb_core::{format_inr, BillState, Totals};

use crate::error::ShareError;

/// Title and body handed to a share target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareMessage {
    pub title: String,
    pub text: String,
}

/// Build the share message for the current invoice.
pub fn share_message(state: &BillState, totals: &Totals) -> ShareMessage {
    let number = &state.invoice.number;
    ShareMessage {
        title: number.clone(),
        text: format!("Invoice {number} — Total {}", format_inr(totals.grand_total)),
    }
}

/// A host capability that can hand a message to another application.
pub trait ShareTarget {
    /// Share `message`.
    ///
    /// # Errors
    ///
    /// [`ShareError::Unsupported`] when the host has no share capability.
    fn share(&self, message: &ShareMessage) -> Result<(), ShareError>;
}

/// A host with no share capability.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoShareTarget;

impl ShareTarget for NoShareTarget {
    fn share(&self, message: &ShareMessage) -> Result<(), ShareError> {
        tracing::debug!(title = %message.title, "share requested without a share target");
        Err(ShareError::Unsupported)
    }
}
