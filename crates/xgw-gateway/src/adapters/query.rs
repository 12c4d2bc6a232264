//! Account-query intake: balance/holdings lookups and the login side effect.

use xgw_ring::{query_type, QueryRecord};

/// Builds a balance or holdings query for `user_id`, carrying the caller's
/// `query_id` through unchanged.
pub fn balance_or_holdings(query_id: u64, user_id: u64, kind: u8) -> QueryRecord {
    debug_assert!(kind == query_type::GET_BALANCE || kind == query_type::GET_HOLDINGS);
    QueryRecord {
        query_id,
        user_id,
        query_type: kind,
    }
}

/// Builds the `ADD_USER_ON_LOGIN` query emitted the first time a username is
/// seen, so the matching engine's own user table picks up the new account.
pub fn add_user_on_login(query_id: u64, user_id: u64) -> QueryRecord {
    QueryRecord {
        query_id,
        user_id,
        query_type: query_type::ADD_USER_ON_LOGIN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_user_on_login_sets_expected_query_type() {
        let record = add_user_on_login(1, 2);
        assert_eq!(record.query_type, query_type::ADD_USER_ON_LOGIN);
        assert_eq!(record.user_id, 2);
    }
}
