use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token::{Mint, Token, TokenAccount};
use crate::collection_seeds;
use crate::common::{NftWithdrawn, COLLECTION_SEED};
use crate::error::ErrorCode;
use crate::instructions::common::{close_token_account, transfer_tokens};
use crate::linked_list::{unlink, ListNode};
use crate::state::{Collection, Market, NftBucket};

pub fn withdraw_nft_impl(ctx: Context<WithdrawNft>) -> Result<()> {
    let accounts = &mut *ctx.accounts;

    let item_key = accounts.withdraw_list_item.key();
    let prev_key = accounts.prev_list_item.key();
    let next_key = accounts.next_list_item.key();
    unlink(
        item_key,
        &accounts.withdraw_list_item,
        ListNode::new(prev_key, &mut accounts.prev_list_item),
        ListNode::new(next_key, &mut accounts.next_list_item),
    )?;

    let market_key = accounts.market.key();
    let seeds: &[&[u8]] = collection_seeds!(market_key, accounts.collection);
    transfer_tokens(
        &accounts.token_program,
        &accounts.program_nft_account,
        &accounts.admin_nft_account,
        accounts.collection.to_account_info(),
        &[seeds],
        1,
    )?;
    accounts.program_nft_account.reload()?;
    if accounts.program_nft_account.amount == 0 {
        close_token_account(
            &accounts.token_program,
            &accounts.program_nft_account,
            accounts.rent_refund.to_account_info(),
            accounts.collection.to_account_info(),
            &[seeds],
        )?;
    }

    let nft_mint = accounts.withdraw_list_item.nft_mint;
    msg!("Withdrew NFT {} from listing {}", nft_mint, item_key);
    emit!(NftWithdrawn {
        collection: accounts.collection.key(),
        listing: item_key,
        nft_mint,
        admin: accounts.admin.key(),
    });
    Ok(())
}

#[derive(Accounts)]
pub struct WithdrawNft<'info> {
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
    #[account(
        mut,
        close = rent_refund,
        has_one = collection @ ErrorCode::InvalidListItem,
        constraint = !collection.is_sentinel(&withdraw_list_item.key()) @ ErrorCode::InvalidListItem
    )]
    pub withdraw_list_item: Box<Account<'info, NftBucket>>,
    /// CHECK: receives the listing and escrow rent; must be the payer recorded on the listing
    #[account(mut, address = withdraw_list_item.payer @ ErrorCode::RentRefundMismatch)]
    pub rent_refund: UncheckedAccount<'info>,
    #[account(address = withdraw_list_item.nft_mint @ ErrorCode::InvalidListItem)]
    pub program_nft_mint: Box<Account<'info, Mint>>,
    #[account(
        mut,
        associated_token::mint = program_nft_mint,
        associated_token::authority = collection
    )]
    pub program_nft_account: Box<Account<'info, TokenAccount>>,
    #[account(
        init_if_needed,
        payer = admin,
        associated_token::mint = program_nft_mint,
        associated_token::authority = admin
    )]
    pub admin_nft_account: Box<Account<'info, TokenAccount>>,
    #[account(mut, address = withdraw_list_item.prev_list_item @ ErrorCode::InvalidListItem)]
    pub prev_list_item: Box<Account<'info, NftBucket>>,
    #[account(mut, address = withdraw_list_item.next_list_item @ ErrorCode::InvalidListItem)]
    pub next_list_item: Box<Account<'info, NftBucket>>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}
