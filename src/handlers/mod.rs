pub mod buy;
pub mod claim;
pub mod context;
pub mod error;
pub mod registry;
pub mod traits;
pub mod users;

pub use context::HandlerContext;
pub use error::HandlerError;
pub use registry::HandlerRegistry;
pub use traits::{EventHandler, EventTrigger, MethodHandler, MethodTrigger, ReceiptHandler};

use std::str::FromStr;

use alloy_primitives::U256;

/// Build the handler registry with all handlers.
///
/// This is where handlers are registered at compile-time. Add new handler
/// registrations here as they are implemented.
pub fn build_registry() -> HandlerRegistry {
    let mut registry = HandlerRegistry::new();

    registry.register_event_handler(claim::ClaimHandler);
    registry.register_method_handler(buy::BuyAssetHandler);

    tracing::info!(
        "Built handler registry with {} handlers",
        registry.handler_count()
    );

    registry
}

/// Parse a string-encoded non-negative integer amount.
pub(crate) fn parse_amount(field: &'static str, raw: &str) -> Result<U256, HandlerError> {
    U256::from_str(raw).map_err(|_| HandlerError::Format {
        field,
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount_decimal() {
        assert_eq!(parse_amount("amount", "100").unwrap(), U256::from(100u64));
    }

    #[test]
    fn test_parse_amount_beyond_u64() {
        // 2^64 exactly; must not overflow a 64-bit lane
        let amount = parse_amount("amount", "18446744073709551616").unwrap();
        assert_eq!(amount, U256::from(u64::MAX) + U256::from(1u64));
    }

    #[test]
    fn test_parse_amount_rejects_garbage() {
        assert!(matches!(
            parse_amount("amount", "12abc"),
            Err(HandlerError::Format {
                field: "amount",
                ..
            })
        ));
    }

    #[test]
    fn test_parse_amount_rejects_negative() {
        assert!(matches!(
            parse_amount("amount", "-5"),
            Err(HandlerError::Format { .. })
        ));
    }

    #[test]
    fn test_registry_wiring() {
        let registry = build_registry();
        assert_eq!(registry.handler_count(), 2);
        assert_eq!(registry.handlers_for_event("ft_mint").len(), 1);
        assert_eq!(registry.handlers_for_method("buy_asset").len(), 1);
        assert!(registry.handlers_for_event("ft_burn").is_empty());
        assert!(registry.handlers_for_method("join_village").is_empty());
    }
}
