use anchor_lang::prelude::*;
use crate::common::MAX_TITLE_LEN;
use crate::error::ErrorCode;

#[account]
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Collection {
    pub nonce: u8,
    pub index: u32,
    pub list_head: Pubkey,
    pub list_tail: Pubkey,
    pub title: String,
}

impl Collection {
    pub const LEN: usize = 8 + 1 + 4 + 32 + 32 + (4 + MAX_TITLE_LEN);

    pub fn new(
        nonce: u8,
        index: u32,
        list_head: Pubkey,
        list_tail: Pubkey,
        title: String,
    ) -> Result<Self> {
        require!(title.len() <= MAX_TITLE_LEN, ErrorCode::TitleTooLong);
        Ok(Self {
            nonce,
            index,
            list_head,
            list_tail,
            title,
        })
    }

    pub fn is_sentinel(&self, key: &Pubkey) -> bool {
        *key == self.list_head || *key == self.list_tail
    }
}
