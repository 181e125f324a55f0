//! Payment methods, payment status, and amount conversion rules.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// How an order is paid. Stored as lowercase TEXT.
///
/// Only `card` involves an external payment-intent lifecycle; the other
/// methods are settled out-of-band (on delivery, at the bank, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Card,
    Cod,
    Upi,
    NetBanking,
}

impl PaymentMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentMethod::Card => "card",
            PaymentMethod::Cod => "cod",
            PaymentMethod::Upi => "upi",
            PaymentMethod::NetBanking => "net_banking",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "card" => Ok(PaymentMethod::Card),
            "cod" => Ok(PaymentMethod::Cod),
            "upi" => Ok(PaymentMethod::Upi),
            "net_banking" => Ok(PaymentMethod::NetBanking),
            other => Err(CoreError::Validation(format!(
                "Unknown payment method '{other}'"
            ))),
        }
    }
}

impl TryFrom<String> for PaymentMethod {
    type Error = CoreError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Settlement status of a payment row. Stored as lowercase TEXT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
}

impl PaymentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Completed => "completed",
            PaymentStatus::Failed => "failed",
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PaymentStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(PaymentStatus::Pending),
            "completed" => Ok(PaymentStatus::Completed),
            "failed" => Ok(PaymentStatus::Failed),
            other => Err(CoreError::Validation(format!(
                "Unknown payment status '{other}'"
            ))),
        }
    }
}

impl TryFrom<String> for PaymentStatus {
    type Error = CoreError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Convert an order total to the provider's integer minor units (cents).
///
/// Rounds half-away-from-zero, matching `f64::round`. The total has already
/// passed [`crate::pricing::validate_total`], so it is finite and
/// non-negative here.
pub fn amount_minor_units(total_amount: f64) -> i64 {
    (total_amount * 100.0).round() as i64
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn method_round_trips_through_text() {
        for method in [
            PaymentMethod::Card,
            PaymentMethod::Cod,
            PaymentMethod::Upi,
            PaymentMethod::NetBanking,
        ] {
            assert_eq!(method.as_str().parse::<PaymentMethod>().unwrap(), method);
        }
        assert_matches!(
            "cheque".parse::<PaymentMethod>(),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn minor_units_round_to_nearest_cent() {
        assert_eq!(amount_minor_units(10.0), 1000);
        assert_eq!(amount_minor_units(10.005), 1001);
        assert_eq!(amount_minor_units(0.0), 0);
        assert_eq!(amount_minor_units(99.994), 9999);
    }
}
