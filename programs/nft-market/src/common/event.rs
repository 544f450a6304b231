use anchor_lang::prelude::*;

use crate::state::SalePrice;

#[event]
pub struct MarketInitialized {
    pub market: Pubkey,
    pub index: u32,
    pub admin: Pubkey,
    pub title: String,
}

#[event]
pub struct AdminAdded {
    pub market: Pubkey,
    pub admin: Pubkey,
    pub added: Pubkey,
}

#[event]
pub struct AdminRemoved {
    pub market: Pubkey,
    pub admin: Pubkey,
    pub removed: Pubkey,
}

#[event]
pub struct CollectionInitialized {
    pub market: Pubkey,
    pub collection: Pubkey,
    pub index: u32,
    pub list_head: Pubkey,
    pub list_tail: Pubkey,
}

#[event]
pub struct PriceModelInitialized {
    pub market: Pubkey,
    pub price_model: Pubkey,
    pub index: u32,
    pub sale_prices: Vec<SalePrice>,
}

#[event]
pub struct NftListed {
    pub collection: Pubkey,
    pub listing: Pubkey,
    pub nft_mint: Pubkey,
    pub price_model: Pubkey,
    pub payer: Pubkey,
}

#[event]
pub struct NftWithdrawn {
    pub collection: Pubkey,
    pub listing: Pubkey,
    pub nft_mint: Pubkey,
    pub admin: Pubkey,
}

#[event]
pub struct NftPurchased {
    pub collection: Pubkey,
    pub listing: Pubkey,
    pub nft_mint: Pubkey,
    pub buyer: Pubkey,
    pub payment_mint: Pubkey,
    pub amount: u64,
}

#[event]
pub struct LiquidityWithdrawn {
    pub market: Pubkey,
    pub admin: Pubkey,
    pub mint: Pubkey,
    pub amount: u64,
}

#[event]
pub struct CollectionClosed {
    pub market: Pubkey,
    pub collection: Pubkey,
    pub rent_refund: Pubkey,
}
