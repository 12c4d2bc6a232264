//! New-order intake: JSON body -> validated `OrderRecord`.

use serde::Deserialize;

use xgw_ring::{OrderRecord, STATUS_PENDING};

use crate::error::AppError;

/// The untrusted, caller-supplied half of an order. `user_id` is
/// deliberately absent here — it comes from the authenticated bearer token,
/// never from the request body. `order_id` is the client's own correlation
/// id and is stamped through unchanged.
#[derive(Debug, Deserialize)]
pub struct NewOrderRequest {
    pub order_id: u64,
    pub price: u64,
    pub timestamp: u64,
    pub shares_qty: u32,
    pub symbol: u32,
    pub side: u8,
    pub order_type: u8,
}

impl NewOrderRequest {
    /// Validates field-by-field in the same order the original matching
    /// engine's intake does, so the first violation reported is always the
    /// same one a client would see against that engine.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.price == 0 && self.order_type == 1 {
            return Err(AppError::InvalidRequest(
                "price must be > 0 for limit orders".to_string(),
            ));
        }
        if self.shares_qty == 0 {
            return Err(AppError::InvalidRequest(
                "shares_qty must be > 0".to_string(),
            ));
        }
        if self.symbol == 0 {
            return Err(AppError::InvalidRequest(
                "symbol must be specified".to_string(),
            ));
        }
        if self.side != 0 && self.side != 1 {
            return Err(AppError::InvalidRequest(format!(
                "side must be 0 (buy) or 1 (sell), got {}",
                self.side
            )));
        }
        if self.order_type != 0 && self.order_type != 1 {
            return Err(AppError::InvalidRequest(format!(
                "order_type must be 0 (market) or 1 (limit), got {}",
                self.order_type
            )));
        }
        if self.timestamp == 0 {
            return Err(AppError::InvalidRequest(
                "timestamp must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Builds the wire record, carrying the client's `order_id` through
    /// unchanged and stamping `user_id` (from the authenticated caller) and
    /// the pending status.
    pub fn into_record(self, user_id: u64) -> OrderRecord {
        OrderRecord {
            order_id: self.order_id,
            price: self.price,
            timestamp: self.timestamp,
            user_id,
            shares_qty: self.shares_qty,
            symbol: self.symbol,
            side: self.side,
            order_type: self.order_type,
            status: STATUS_PENDING,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_limit_order() -> NewOrderRequest {
        NewOrderRequest {
            order_id: 3,
            price: 100,
            timestamp: 1,
            shares_qty: 10,
            symbol: 42,
            side: 0,
            order_type: 1,
        }
    }

    #[test]
    fn accepts_a_well_formed_limit_order() {
        assert!(valid_limit_order().validate().is_ok());
    }

    #[test]
    fn rejects_zero_price_limit_order() {
        let mut req = valid_limit_order();
        req.price = 0;
        assert!(matches!(req.validate(), Err(AppError::InvalidRequest(_))));
    }

    #[test]
    fn accepts_zero_price_market_order() {
        let mut req = valid_limit_order();
        req.price = 0;
        req.order_type = 0;
        assert!(req.validate().is_ok());
    }

    #[test]
    fn rejects_zero_shares() {
        let mut req = valid_limit_order();
        req.shares_qty = 0;
        assert!(req.validate().is_err());
    }

    #[test]
    fn rejects_bad_side() {
        let mut req = valid_limit_order();
        req.side = 7;
        assert!(req.validate().is_err());
    }

    #[test]
    fn into_record_carries_client_order_id_and_stamps_authenticated_user() {
        let record = valid_limit_order().into_record(9);
        assert_eq!(record.order_id, 3);
        assert_eq!(record.user_id, 9);
        assert_eq!(record.status, STATUS_PENDING);
    }
}
