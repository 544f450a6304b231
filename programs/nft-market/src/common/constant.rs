use anchor_lang::prelude::*;

pub const GLOBAL_STATE_SEED: &[u8] = b"global";
pub const COLLECTION_SEED: &[u8] = b"collection";
pub const PRICE_MODEL_SEED: &[u8] = b"price_model";
pub const LIST_HEAD_SEED: &[u8] = b"head";
pub const LIST_TAIL_SEED: &[u8] = b"tail";

pub const MAX_ADMINS: usize = 16;
pub const MAX_SALE_PRICES: usize = 8;
pub const MAX_TITLE_LEN: usize = 32;

/// Mint of wrapped SOL; purchases in this mint debit a single-use wrapped account.
pub const NATIVE_MINT: Pubkey = anchor_spl::token::spl_token::native_mint::ID;

/// Size of an SPL token account, used for the wrapped SOL deposit.
pub const TOKEN_ACCOUNT_LEN: usize = 165;
