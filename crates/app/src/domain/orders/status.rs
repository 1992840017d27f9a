//! Order status codes and the transitions allowed between them.

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use thiserror::Error;

/// Lifecycle state of an order, stored as a single-letter code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    Pending,
    Shipped,
    InTransit,
    OutForDelivery,
    Complete,
    Failed,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [Self; 7] = [
        Self::Pending,
        Self::Shipped,
        Self::InTransit,
        Self::OutForDelivery,
        Self::Complete,
        Self::Failed,
        Self::Cancelled,
    ];

    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Pending => "P",
            Self::Shipped => "S",
            Self::InTransit => "T",
            Self::OutForDelivery => "O",
            Self::Complete => "C",
            Self::Failed => "F",
            Self::Cancelled => "X",
        }
    }

    /// Human readable name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Shipped => "Shipped",
            Self::InTransit => "In Transit",
            Self::OutForDelivery => "Out for Delivery",
            Self::Complete => "Complete",
            Self::Failed => "Failed",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Whether an order may move from `self` to `next`.
    ///
    /// Any non-terminal status may fail; otherwise orders only move one step
    /// forward, and only pending orders can be cancelled.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Shipped | Self::Cancelled | Self::Failed)
                | (Self::Shipped, Self::InTransit | Self::Failed)
                | (Self::InTransit, Self::OutForDelivery | Self::Failed)
                | (Self::OutForDelivery, Self::Complete | Self::Failed)
        )
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Complete | Self::Failed | Self::Cancelled)
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown order status code: {0:?}")]
pub struct UnknownOrderStatus(pub String);

impl FromStr for OrderStatus {
    type Err = UnknownOrderStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.code() == value)
            .ok_or_else(|| UnknownOrderStatus(value.to_string()))
    }
}
