//! Legal status moves for shipments.
//!
//! The transition table is plain data: one adjacency slice per status.
//! The `match` in [`TransitionPolicy::allowed_from`] is exhaustive, so adding
//! a status to [`ShipmentStatus`] does not compile until its row is written.

use crate::core::ShipmentStatus;

use ShipmentStatus::*;

const FROM_POSTED: &[ShipmentStatus] = &[Accepted, Canceled];
const FROM_ACCEPTED: &[ShipmentStatus] = &[InTransit, Canceled];
const FROM_IN_TRANSIT: &[ShipmentStatus] = &[Delivered, Disputed];
const FROM_DISPUTED: &[ShipmentStatus] = &[Delivered, Canceled];
const TERMINAL: &[ShipmentStatus] = &[];

/// Pure, stateless transition policy.
///
/// Self-transitions are never allowed: no status lists itself.
///
/// # Example
///
/// ```rust
/// use shipment_lifecycle::core::ShipmentStatus;
/// use shipment_lifecycle::policy::TransitionPolicy;
///
/// assert!(TransitionPolicy::is_allowed(
///     ShipmentStatus::InTransit,
///     ShipmentStatus::Delivered
/// ));
/// assert!(!TransitionPolicy::is_allowed(
///     ShipmentStatus::Delivered,
///     ShipmentStatus::Disputed
/// ));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TransitionPolicy;

impl TransitionPolicy {
    /// Statuses reachable in one step from `current`.
    pub fn allowed_from(current: ShipmentStatus) -> &'static [ShipmentStatus] {
        match current {
            Posted => FROM_POSTED,
            Accepted => FROM_ACCEPTED,
            InTransit => FROM_IN_TRANSIT,
            Disputed => FROM_DISPUTED,
            Delivered | Canceled => TERMINAL,
        }
    }

    /// Whether moving from `current` to `requested` is legal.
    pub fn is_allowed(current: ShipmentStatus, requested: ShipmentStatus) -> bool {
        Self::allowed_from(current).contains(&requested)
    }

    /// Every legal `(from, to)` pair.
    pub fn edges() -> impl Iterator<Item = (ShipmentStatus, ShipmentStatus)> {
        ShipmentStatus::ALL.into_iter().flat_map(|from| {
            Self::allowed_from(from)
                .iter()
                .map(move |&to| (from, to))
        })
    }
}
