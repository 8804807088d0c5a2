//! Product availability state machine.

use serde::{Deserialize, Serialize};

/// The availability of a product.
///
/// State transitions:
/// ```text
/// Available ──purchase──► Unavailable
/// ```
///
/// There is no way back: `Unavailable` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ProductState {
    /// The product can be purchased.
    #[default]
    Available,

    /// The product has been purchased (terminal state).
    Unavailable,
}

impl ProductState {
    /// Maps the stored availability flag onto a state.
    pub fn from_available(available: bool) -> Self {
        if available {
            ProductState::Available
        } else {
            ProductState::Unavailable
        }
    }

    /// Returns true if the product can be purchased in this state.
    pub fn can_purchase(&self) -> bool {
        matches!(self, ProductState::Available)
    }

    /// Returns the availability flag for this state.
    pub fn is_available(&self) -> bool {
        matches!(self, ProductState::Available)
    }

    /// Returns true if no further transitions are possible.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ProductState::Unavailable)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProductState::Available => "Available",
            ProductState::Unavailable => "Unavailable",
        }
    }
}

impl std::fmt::Display for ProductState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_is_available() {
        assert_eq!(ProductState::default(), ProductState::Available);
    }

    #[test]
    fn maps_availability_flag() {
        assert_eq!(ProductState::from_available(true), ProductState::Available);
        assert_eq!(ProductState::from_available(false), ProductState::Unavailable);
        assert!(ProductState::Available.is_available());
        assert!(!ProductState::Unavailable.is_available());
    }

    #[test]
    fn only_available_can_be_purchased() {
        assert!(ProductState::Available.can_purchase());
        assert!(!ProductState::Unavailable.can_purchase());
    }

    #[test]
    fn unavailable_is_terminal() {
        assert!(!ProductState::Available.is_terminal());
        assert!(ProductState::Unavailable.is_terminal());
    }

    #[test]
    fn display() {
        assert_eq!(ProductState::Available.to_string(), "Available");
        assert_eq!(ProductState::Unavailable.to_string(), "Unavailable");
    }
}
