//! Status enums for various entities.

use serde::{Deserialize, Serialize};

/// How an order is paid for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMode {
    /// Cash on delivery.
    #[default]
    Cod,
    /// Paid online.
    Online,
}

impl std::fmt::Display for PaymentMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cod => write!(f, "COD"),
            Self::Online => write!(f, "ONLINE"),
        }
    }
}

impl std::str::FromStr for PaymentMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "COD" => Ok(Self::Cod),
            "ONLINE" => Ok(Self::Online),
            _ => Err(format!("invalid payment mode: {s}")),
        }
    }
}

/// Lifecycle of a placed order.
///
/// The backend only tracks a cancelled flag; every order that is not
/// cancelled is active and may still be cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Active,
    Cancelled,
}

impl OrderStatus {
    /// Whether an order in this status may be cancelled.
    #[must_use]
    pub const fn is_cancellable(self) -> bool {
        matches!(self, Self::Active)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Adjustment applied to a cart line by the quantity endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuantityAction {
    /// Add one unit.
    Increase,
    /// Remove one unit; the line is deleted when it reaches zero.
    Decrease,
}

impl std::fmt::Display for QuantityAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Increase => write!(f, "increase"),
            Self::Decrease => write!(f, "decrease"),
        }
    }
}

impl std::str::FromStr for QuantityAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "increase" => Ok(Self::Increase),
            "decrease" => Ok(Self::Decrease),
            _ => Err(format!("invalid quantity action: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_mode_wire_format() {
        assert_eq!(serde_json::to_string(&PaymentMode::Cod).unwrap(), "\"COD\"");
        assert_eq!(
            serde_json::to_string(&PaymentMode::Online).unwrap(),
            "\"ONLINE\""
        );
        assert_eq!("online".parse::<PaymentMode>().unwrap(), PaymentMode::Online);
        assert!("card".parse::<PaymentMode>().is_err());
    }

    #[test]
    fn test_quantity_action_wire_format() {
        assert_eq!(
            serde_json::to_string(&QuantityAction::Decrease).unwrap(),
            "\"decrease\""
        );
        assert_eq!(
            "increase".parse::<QuantityAction>().unwrap(),
            QuantityAction::Increase
        );
    }

    #[test]
    fn test_only_active_orders_are_cancellable() {
        assert!(OrderStatus::Active.is_cancellable());
        assert!(!OrderStatus::Cancelled.is_cancellable());
    }
}
