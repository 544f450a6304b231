#[macro_export]
/// Generate signer seeds for a market PDA
macro_rules! market_seeds {
    ($global_state:expr, $market:expr) => {
        &[
            $global_state.as_ref(),
            &$market.index.to_le_bytes(),
            &[$market.nonce],
        ]
    };
}

#[macro_export]
/// Generate signer seeds for a collection PDA
macro_rules! collection_seeds {
    ($market:expr, $collection:expr) => {
        &[
            $market.as_ref(),
            &$collection.index.to_le_bytes(),
            $crate::common::COLLECTION_SEED,
            &[$collection.nonce],
        ]
    };
}

/// Scale a whole-token amount to the mint's smallest unit.
pub fn to_raw_amount(decimals: u8, amount: u64) -> Option<u64> {
    10u64.checked_pow(decimals as u32)?.checked_mul(amount)
}
