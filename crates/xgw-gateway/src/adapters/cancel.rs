//! Cancel-request intake: JSON body -> `CancelRecord`.

use serde::Deserialize;

use xgw_ring::CancelRecord;

#[derive(Debug, Deserialize)]
pub struct CancelOrderRequest {
    pub order_id: u64,
    pub symbol: u32,
}

impl CancelOrderRequest {
    /// Builds the wire record with the authenticated caller's `user_id`,
    /// never the request body's.
    pub fn into_record(self, user_id: u64) -> CancelRecord {
        CancelRecord {
            order_id: self.order_id,
            user_id,
            symbol: self.symbol,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn into_record_uses_authenticated_user_id() {
        let req = CancelOrderRequest {
            order_id: 11,
            symbol: 42,
        };
        let record = req.into_record(77);
        assert_eq!(record.order_id, 11);
        assert_eq!(record.user_id, 77);
        assert_eq!(record.symbol, 42);
    }
}
