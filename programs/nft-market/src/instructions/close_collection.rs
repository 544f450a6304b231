use anchor_lang::prelude::*;
use crate::common::{CollectionClosed, COLLECTION_SEED};
use crate::error::ErrorCode;
use crate::linked_list::is_empty;
use crate::state::{Collection, Market, NftBucket};

pub fn close_collection_impl(ctx: Context<CloseCollection>) -> Result<()> {
    let accounts = &ctx.accounts;
    require!(
        is_empty(&accounts.list_head, &accounts.list_tail.key()),
        ErrorCode::CollectionNonEmpty
    );

    msg!("Closing collection {}", accounts.collection.key());
    emit!(CollectionClosed {
        market: accounts.market.key(),
        collection: accounts.collection.key(),
        rent_refund: accounts.rent_refund.key(),
    });
    Ok(())
}

#[derive(Accounts)]
pub struct CloseCollection<'info> {
    pub admin: Signer<'info>,
    #[account(constraint = market.is_admin(&admin.key()) @ ErrorCode::Unauthorized)]
    pub market: Box<Account<'info, Market>>,
    /// CHECK: receives the rent of the collection and both sentinels
    #[account(mut)]
    pub rent_refund: UncheckedAccount<'info>,
    #[account(
        mut,
        close = rent_refund,
        seeds = [
            market.key().as_ref(),
            &collection.index.to_le_bytes(),
            COLLECTION_SEED
        ],
        bump = collection.nonce
    )]
    pub collection: Box<Account<'info, Collection>>,
    #[account(
        mut,
        close = rent_refund,
        address = collection.list_head @ ErrorCode::InvalidListItem
    )]
    pub list_head: Box<Account<'info, NftBucket>>,
    #[account(
        mut,
        close = rent_refund,
        address = collection.list_tail @ ErrorCode::InvalidListItem
    )]
    pub list_tail: Box<Account<'info, NftBucket>>,
}
