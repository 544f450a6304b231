use anchor_lang::prelude::*;
use crate::error::ErrorCode;

#[account]
#[derive(Debug, Default, PartialEq, Eq)]
pub struct GlobalState {
    pub nonce: u8,
    pub num_markets: u32,
}

impl GlobalState {
    pub const LEN: usize = 8 + 1 + 4;

    /// Hands out the index of the next market and advances the counter.
    pub fn claim_market_index(&mut self) -> Result<u32> {
        let index = self.num_markets;
        self.num_markets = self
            .num_markets
            .checked_add(1)
            .ok_or(ErrorCode::Overflow)?;
        Ok(index)
    }
}
