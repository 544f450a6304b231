use anchor_lang::prelude::*;
use crate::common::{CollectionInitialized, COLLECTION_SEED, LIST_HEAD_SEED, LIST_TAIL_SEED};
use crate::error::ErrorCode;
use crate::state::{Collection, Market, NftBucket};

pub fn init_collection_impl(ctx: Context<InitCollection>, title: String) -> Result<()> {
    let admin = ctx.accounts.admin.key();
    let collection_key = ctx.accounts.collection.key();
    let list_head_key = ctx.accounts.list_head.key();
    let list_tail_key = ctx.accounts.list_tail.key();

    let index = ctx.accounts.market.claim_collection_index()?;
    let collection = Collection::new(
        ctx.bumps.collection,
        index,
        list_head_key,
        list_tail_key,
        title,
    )?;
    ctx.accounts.collection.set_inner(collection);
    ctx.accounts.list_head.set_inner(NftBucket::list_head(
        ctx.bumps.list_head,
        collection_key,
        admin,
        list_tail_key,
    ));
    ctx.accounts.list_tail.set_inner(NftBucket::list_tail(
        ctx.bumps.list_tail,
        collection_key,
        admin,
        list_head_key,
    ));

    msg!("Initialized collection {}: {}", index, collection_key);
    emit!(CollectionInitialized {
        market: ctx.accounts.market.key(),
        collection: collection_key,
        index,
        list_head: list_head_key,
        list_tail: list_tail_key,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct InitCollection<'info> {
    #[account(mut)]
    pub admin: Signer<'info>,
    #[account(
        mut,
        constraint = market.is_admin(&admin.key()) @ ErrorCode::Unauthorized
    )]
    pub market: Box<Account<'info, Market>>,
    #[account(
        init,
        payer = admin,
        space = Collection::LEN,
        seeds = [
            market.key().as_ref(),
            &market.num_collections.to_le_bytes(),
            COLLECTION_SEED
        ],
        bump
    )]
    pub collection: Box<Account<'info, Collection>>,
    #[account(
        init,
        payer = admin,
        space = NftBucket::LEN,
        seeds = [collection.key().as_ref(), LIST_HEAD_SEED],
        bump
    )]
    pub list_head: Box<Account<'info, NftBucket>>,
    #[account(
        init,
        payer = admin,
        space = NftBucket::LEN,
        seeds = [collection.key().as_ref(), LIST_TAIL_SEED],
        bump
    )]
    pub list_tail: Box<Account<'info, NftBucket>>,
    pub system_program: Program<'info, System>,
}
