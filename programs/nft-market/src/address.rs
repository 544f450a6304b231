//! Derived addresses of every program record. Each derivation mixes in a
//! distinct tag or seed layout, so records of different kinds never collide.

use anchor_lang::prelude::*;
use crate::common::{
    COLLECTION_SEED, GLOBAL_STATE_SEED, LIST_HEAD_SEED, LIST_TAIL_SEED, PRICE_MODEL_SEED,
};

pub fn global_state_address(program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[GLOBAL_STATE_SEED], program_id)
}

pub fn market_address(program_id: &Pubkey, global_state: &Pubkey, index: u32) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[global_state.as_ref(), &index.to_le_bytes()], program_id)
}

pub fn collection_address(program_id: &Pubkey, market: &Pubkey, index: u32) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[market.as_ref(), &index.to_le_bytes(), COLLECTION_SEED],
        program_id,
    )
}

pub fn price_model_address(program_id: &Pubkey, market: &Pubkey, index: u32) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[market.as_ref(), &index.to_le_bytes(), PRICE_MODEL_SEED],
        program_id,
    )
}

pub fn list_head_address(program_id: &Pubkey, collection: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[collection.as_ref(), LIST_HEAD_SEED], program_id)
}

pub fn list_tail_address(program_id: &Pubkey, collection: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[collection.as_ref(), LIST_TAIL_SEED], program_id)
}
