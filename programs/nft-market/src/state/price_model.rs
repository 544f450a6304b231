use anchor_lang::prelude::*;
use crate::common::{to_raw_amount, MAX_SALE_PRICES};
use crate::error::ErrorCode;

/// One accepted payment: `amount` is in the smallest unit of `mint`.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SalePrice {
    pub mint: Pubkey,
    pub amount: u64,
}

impl SalePrice {
    pub const LEN: usize = 32 + 8;

    /// Price of `amount` whole tokens of a mint with `decimals` places.
    pub fn from_whole_units(mint: Pubkey, decimals: u8, amount: u64) -> Result<Self> {
        let amount = to_raw_amount(decimals, amount).ok_or(ErrorCode::Overflow)?;
        Ok(Self { mint, amount })
    }
}

/// Immutable list of accepted (mint, price) pairs shared by listings of a market.
#[account]
#[derive(Debug, Default, PartialEq, Eq)]
pub struct PriceModel {
    pub nonce: u8,
    pub index: u32,
    pub market: Pubkey,
    pub sale_prices: Vec<SalePrice>,
}

impl PriceModel {
    pub const LEN: usize = 8 + 1 + 4 + 32 + (4 + SalePrice::LEN * MAX_SALE_PRICES);

    pub fn new(nonce: u8, index: u32, market: Pubkey, sale_prices: Vec<SalePrice>) -> Result<Self> {
        require!(sale_prices.len() <= MAX_SALE_PRICES, ErrorCode::TooManySalePrices);
        for (i, sale_price) in sale_prices.iter().enumerate() {
            if sale_prices[..i].iter().any(|prev| prev.mint == sale_price.mint) {
                msg!("Duplicate sale price mint accepted: {}", sale_price.mint);
            }
        }
        Ok(Self {
            nonce,
            index,
            market,
            sale_prices,
        })
    }

    /// First sale price quoted in `mint`.
    pub fn sale_price(&self, mint: &Pubkey) -> Result<&SalePrice> {
        self.sale_prices
            .iter()
            .find(|sale_price| sale_price.mint == *mint)
            .ok_or_else(|| ErrorCode::InvalidPurchaseMint.into())
    }
}
