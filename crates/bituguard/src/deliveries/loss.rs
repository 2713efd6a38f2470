//! Delivery loss accounting for a tanker receipt.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Loss figures derived from invoiced vs received quantity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LossBreakdown {
    /// Mass lost in transit, metric tons. Never negative: over-delivery
    /// clamps to zero.
    pub loss_mt: Decimal,
    /// Monetary loss, rupees, rounded to 2 decimals.
    pub loss_rupees: Decimal,
    /// Share of invoiced mass lost, percent, rounded to 2 decimals. Zero for
    /// a degenerate zero-quantity delivery.
    pub leakage_pct: Decimal,
}

/// Rounds to 2 decimal places, midpoint away from zero. The result carries
/// exactly two fractional digits so stored and rendered values agree.
pub(crate) fn round2(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

/// Computes the loss breakdown for one delivery.
///
/// `invoiced` may legitimately be zero; the leakage percentage is defined as
/// zero in that case rather than dividing by zero.
pub fn compute_loss(invoiced: Decimal, received: Decimal, rate: Decimal) -> LossBreakdown {
    let loss_mt = (invoiced - received).max(Decimal::ZERO);
    let loss_rupees = round2(loss_mt * rate);
    let leakage_pct = if invoiced > Decimal::ZERO {
        round2(loss_mt / invoiced * Decimal::ONE_HUNDRED)
    } else {
        Decimal::ZERO
    };

    LossBreakdown {
        loss_mt,
        loss_rupees,
        leakage_pct,
    }
}
