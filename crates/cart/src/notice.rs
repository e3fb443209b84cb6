//! User-facing notices for failed cart operations.
//!
//! The store reports outcomes; which of them the user hears about, and
//! through what channel, is the consumer's concern. This module carries
//! the message table and the mapping so every consumer shows the same
//! text.

use crate::store::CartOutcome;

/// Which cart operation produced an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartOp {
    Add,
    Remove,
    UpdateAmount,
}

/// Notice shown when the requested quantity exceeds the available stock.
pub const OUT_OF_STOCK: &str = "Requested quantity is out of stock";

/// Notice shown when adding a product fails.
pub const ADD_FAILED: &str = "Failed to add the product";

/// Notice shown when removing a product fails.
pub const REMOVE_FAILED: &str = "Failed to remove the product";

/// Notice shown when changing a quantity fails.
pub const UPDATE_FAILED: &str = "Failed to update the quantity";

/// The notice due for an outcome, if any.
///
/// Committed and guarded-no-op outcomes produce no notice. Stock
/// rejections share one message across operations; everything else gets
/// the operation's generic failure message.
#[must_use]
pub fn for_outcome(op: CartOp, outcome: &CartOutcome) -> Option<&'static str> {
    match outcome {
        CartOutcome::Committed | CartOutcome::Ignored => None,
        CartOutcome::StockExceeded => Some(OUT_OF_STOCK),
        CartOutcome::NotFound | CartOutcome::UpstreamFailure(_) => Some(match op {
            CartOp::Add => ADD_FAILED,
            CartOp::Remove => REMOVE_FAILED,
            CartOp::UpdateAmount => UPDATE_FAILED,
        }),
    }
}

/// A fire-and-forget sink for user-facing error notices.
///
/// The toast equivalent: consumers implement it over whatever display
/// mechanism they have.
pub trait NoticeSink {
    /// Display an error message to the user.
    fn error(&mut self, message: &str);
}
