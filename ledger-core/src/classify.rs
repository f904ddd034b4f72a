//! Marker-based transaction classification.
//!
//! All checks are case-sensitive substring matches against the literal text
//! the wallet history page uses.

pub const MARKET_MARKER: &str = "Steam Community Market";
pub const REFUND_MARKER: &str = "Refund";
pub const PURCHASE_MARKER: &str = "Purchase";
pub const IN_GAME_PURCHASE_MARKER: &str = "In-Game Purchase";
pub const WALLET_CREDIT_MARKER: &str = "Wallet Credit";
pub const EXTERNAL_PROCESSORS: [&str; 2] = ["PayPal", "MasterCard"];

/// Peer-to-peer marketplace activity
pub fn is_market(description: &str) -> bool {
    description.contains(MARKET_MARKER)
}

/// Sign alone decides.
pub fn is_expense(amount: f64) -> bool {
    amount < 0.0
}

/// Paid through a third-party processor or with store credit instead of the
/// wallet balance.
pub fn is_external_payment(payment_method: &str, description: &str) -> bool {
    EXTERNAL_PROCESSORS
        .iter()
        .any(|marker| payment_method.contains(marker))
        || description.contains(WALLET_CREDIT_MARKER)
}

/// A direct purchase: not a market sale and not a refund.
pub fn is_game_purchase(description: &str) -> bool {
    if is_market(description) || description.contains(REFUND_MARKER) {
        return false;
    }
    description.contains(PURCHASE_MARKER) || description.contains(IN_GAME_PURCHASE_MARKER)
}
