use anchor_lang::prelude::*;

/// A node of a collection's listing list. Sentinels (head and tail) share the
/// layout and leave `nft_mint` and `price_model` unset.
#[account]
#[derive(Debug, Default, PartialEq, Eq)]
pub struct NftBucket {
    pub nonce: u8,
    pub collection: Pubkey,
    pub nft_mint: Pubkey,
    pub price_model: Pubkey,
    pub prev_list_item: Pubkey,
    pub next_list_item: Pubkey,
    pub payer: Pubkey,
}

impl NftBucket {
    pub const LEN: usize = 8 + 1 + 32 * 6;

    pub fn list_head(nonce: u8, collection: Pubkey, payer: Pubkey, list_tail: Pubkey) -> Self {
        Self {
            nonce,
            collection,
            next_list_item: list_tail,
            payer,
            ..Default::default()
        }
    }

    pub fn list_tail(nonce: u8, collection: Pubkey, payer: Pubkey, list_head: Pubkey) -> Self {
        Self {
            nonce,
            collection,
            prev_list_item: list_head,
            payer,
            ..Default::default()
        }
    }

    /// An unlinked listing; `linked_list::insert_after_head` sets the neighbors.
    pub fn listing(
        collection: Pubkey,
        nft_mint: Pubkey,
        price_model: Pubkey,
        payer: Pubkey,
    ) -> Self {
        Self {
            collection,
            nft_mint,
            price_model,
            payer,
            ..Default::default()
        }
    }
}
