use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token::{Mint, Token, TokenAccount};
use crate::common::{NftListed, COLLECTION_SEED, PRICE_MODEL_SEED};
use crate::error::ErrorCode;
use crate::instructions::common::transfer_tokens;
use crate::linked_list::{insert_after_head, ListNode};
use crate::state::{Collection, Market, NftBucket, PriceModel};

pub fn add_nft_impl(ctx: Context<AddNft>) -> Result<()> {
    let accounts = &mut *ctx.accounts;

    transfer_tokens(
        &accounts.token_program,
        &accounts.admin_nft_account,
        &accounts.program_nft_account,
        accounts.admin.to_account_info(),
        &[],
        1,
    )?;

    let list_head_key = accounts.list_head.key();
    let next_key = accounts.next_list_item.key();
    let new_key = accounts.new_item.key();
    let nft_mint = accounts.admin_nft_mint.key();
    let price_model = accounts.price_model.key();
    let payer = accounts.admin.key();
    let collection = accounts.collection.key();

    accounts
        .new_item
        .set_inner(NftBucket::listing(collection, nft_mint, price_model, payer));
    insert_after_head(
        ListNode::new(list_head_key, &mut accounts.list_head),
        ListNode::new(next_key, &mut accounts.next_list_item),
        ListNode::new(new_key, &mut accounts.new_item),
    )?;

    msg!("Listed NFT {} as {} in collection {}", nft_mint, new_key, collection);
    emit!(NftListed {
        collection,
        listing: new_key,
        nft_mint,
        price_model,
        payer,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct AddNft<'info> {
    #[account(mut)]
    pub admin: Signer<'info>,
    #[account(constraint = market.is_admin(&admin.key()) @ ErrorCode::Unauthorized)]
    pub market: Box<Account<'info, Market>>,
    #[account(
        seeds = [
            market.key().as_ref(),
            &collection.index.to_le_bytes(),
            COLLECTION_SEED
        ],
        bump = collection.nonce
    )]
    pub collection: Box<Account<'info, Collection>>,
    #[account(mut, address = collection.list_head @ ErrorCode::InvalidListItem)]
    pub list_head: Box<Account<'info, NftBucket>>,
    #[account(mut, address = list_head.next_list_item @ ErrorCode::InvalidListItem)]
    pub next_list_item: Box<Account<'info, NftBucket>>,
    #[account(init, payer = admin, space = NftBucket::LEN)]
    pub new_item: Box<Account<'info, NftBucket>>,
    #[account(
        seeds = [
            market.key().as_ref(),
            &price_model.index.to_le_bytes(),
            PRICE_MODEL_SEED
        ],
        bump = price_model.nonce,
        has_one = market
    )]
    pub price_model: Box<Account<'info, PriceModel>>,
    pub admin_nft_mint: Box<Account<'info, Mint>>,
    #[account(
        mut,
        token::mint = admin_nft_mint,
        token::authority = admin,
        constraint = admin_nft_account.amount == 1 @ ErrorCode::InvalidNftAmount
    )]
    pub admin_nft_account: Box<Account<'info, TokenAccount>>,
    #[account(
        init_if_needed,
        payer = admin,
        associated_token::mint = admin_nft_mint,
        associated_token::authority = collection
    )]
    pub program_nft_account: Box<Account<'info, TokenAccount>>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}
