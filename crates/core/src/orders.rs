//! Order lifecycle state machine.
//!
//! The legal transition graph is `pending -> paid -> shipped -> delivered`,
//! with `cancelled` reachable from `pending` and `paid` only. `delivered`
//! and `cancelled` are terminal: a delivered order rejects every change,
//! including cancellation.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Lifecycle status of an order. Stored as lowercase TEXT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Paid,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Database / wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Paid => "paid",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// A terminal status permits no further transition.
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// Cancellation is only allowed before fulfilment starts.
    pub fn is_cancellable(self) -> bool {
        matches!(self, OrderStatus::Pending | OrderStatus::Paid)
    }

    /// Whether `self -> to` is an edge of the legal transition graph.
    pub fn can_transition_to(self, to: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, to),
            (Pending, Paid)
                | (Paid, Shipped)
                | (Shipped, Delivered)
                | (Pending, Cancelled)
                | (Paid, Cancelled)
        )
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "paid" => Ok(OrderStatus::Paid),
            "shipped" => Ok(OrderStatus::Shipped),
            "delivered" => Ok(OrderStatus::Delivered),
            "cancelled" => Ok(OrderStatus::Cancelled),
            other => Err(CoreError::Validation(format!(
                "Unknown order status '{other}'"
            ))),
        }
    }
}

impl TryFrom<String> for OrderStatus {
    type Error = CoreError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Validate a requested status transition, returning [`CoreError::InvalidState`]
/// for anything outside the legal graph.
///
/// The current status must be re-read and validated inside the same database
/// transaction that applies the update, so a transition is never partially
/// applied against a stale status.
pub fn validate_transition(from: OrderStatus, to: OrderStatus) -> Result<(), CoreError> {
    if from.can_transition_to(to) {
        return Ok(());
    }
    Err(match from {
        OrderStatus::Cancelled => {
            CoreError::InvalidState("Cannot update status of a cancelled order".into())
        }
        OrderStatus::Delivered => {
            CoreError::InvalidState("Cannot change status of a delivered order".into())
        }
        _ => CoreError::InvalidState(format!("Cannot transition order from {from} to {to}")),
    })
}

/// Validate that an order in `status` may be cancelled by its owner.
pub fn validate_cancellable(status: OrderStatus) -> Result<(), CoreError> {
    match status {
        s if s.is_cancellable() => Ok(()),
        OrderStatus::Cancelled => {
            Err(CoreError::InvalidState("Order is already cancelled".into()))
        }
        s => Err(CoreError::InvalidState(format!(
            "Cannot cancel order that is already {s}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use OrderStatus::*;

    const ALL: [OrderStatus; 5] = [Pending, Paid, Shipped, Delivered, Cancelled];

    #[test]
    fn legal_edges_are_exactly_the_graph() {
        let legal = [
            (Pending, Paid),
            (Paid, Shipped),
            (Shipped, Delivered),
            (Pending, Cancelled),
            (Paid, Cancelled),
        ];
        for from in ALL {
            for to in ALL {
                let expected = legal.contains(&(from, to));
                assert_eq!(
                    from.can_transition_to(to),
                    expected,
                    "transition {from} -> {to}"
                );
            }
        }
    }

    #[test]
    fn cancelled_rejects_every_transition() {
        for to in ALL {
            assert_matches!(
                validate_transition(Cancelled, to),
                Err(CoreError::InvalidState(_))
            );
        }
    }

    #[test]
    fn delivered_rejects_every_transition_including_cancel() {
        for to in ALL {
            assert_matches!(
                validate_transition(Delivered, to),
                Err(CoreError::InvalidState(_))
            );
        }
    }

    #[test]
    fn only_pending_and_paid_are_cancellable() {
        assert!(validate_cancellable(Pending).is_ok());
        assert!(validate_cancellable(Paid).is_ok());
        assert_matches!(validate_cancellable(Shipped), Err(CoreError::InvalidState(_)));
        assert_matches!(
            validate_cancellable(Delivered),
            Err(CoreError::InvalidState(_))
        );
        assert_matches!(
            validate_cancellable(Cancelled),
            Err(CoreError::InvalidState(_))
        );
    }

    #[test]
    fn status_round_trips_through_text() {
        for status in ALL {
            assert_eq!(status.as_str().parse::<OrderStatus>().unwrap(), status);
        }
        assert_matches!(
            "refunded".parse::<OrderStatus>(),
            Err(CoreError::Validation(_))
        );
    }
}
