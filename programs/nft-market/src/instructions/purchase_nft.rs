use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token::{Mint, Token, TokenAccount};
use crate::collection_seeds;
use crate::common::{NftPurchased, COLLECTION_SEED, NATIVE_MINT};
use crate::error::ErrorCode;
use crate::instructions::common::{close_token_account, transfer_tokens};
use crate::linked_list::{unlink, ListNode};
use crate::state::{Collection, Market, NftBucket, PriceModel};

/// Sells a listing for its price in `debit_mint`.
///
/// A native-mint `debit_account` is treated as a single-use wrapped SOL account
/// and closed back to the buyer, so pass a freshly wrapped account rather than
/// a long-lived wSOL balance.
pub fn purchase_nft_impl(ctx: Context<PurchaseNft>) -> Result<()> {
    let accounts = &mut *ctx.accounts;

    let debit_mint = accounts.debit_mint.key();
    let amount = accounts.price_model.sale_price(&debit_mint)?.amount;

    transfer_tokens(
        &accounts.token_program,
        &accounts.debit_account,
        &accounts.program_credit_account,
        accounts.owner.to_account_info(),
        &[],
        amount,
    )?;
    if debit_mint == NATIVE_MINT {
        close_token_account(
            &accounts.token_program,
            &accounts.debit_account,
            accounts.owner.to_account_info(),
            accounts.owner.to_account_info(),
            &[],
        )?;
    }

    let market_key = accounts.market.key();
    let seeds: &[&[u8]] = collection_seeds!(market_key, accounts.collection);
    transfer_tokens(
        &accounts.token_program,
        &accounts.program_nft_account,
        &accounts.owner_nft_account,
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

    let item_key = accounts.purchase_list_item.key();
    let prev_key = accounts.prev_list_item.key();
    let next_key = accounts.next_list_item.key();
    unlink(
        item_key,
        &accounts.purchase_list_item,
        ListNode::new(prev_key, &mut accounts.prev_list_item),
        ListNode::new(next_key, &mut accounts.next_list_item),
    )?;

    let nft_mint = accounts.purchase_list_item.nft_mint;
    msg!("Sold NFT {} for {} of {}", nft_mint, amount, debit_mint);
    emit!(NftPurchased {
        collection: accounts.collection.key(),
        listing: item_key,
        nft_mint,
        buyer: accounts.owner.key(),
        payment_mint: debit_mint,
        amount,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct PurchaseNft<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,
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
        constraint = !collection.is_sentinel(&purchase_list_item.key()) @ ErrorCode::InvalidListItem
    )]
    pub purchase_list_item: Box<Account<'info, NftBucket>>,
    /// CHECK: receives the listing and escrow rent; must be the payer recorded on the listing
    #[account(mut, address = purchase_list_item.payer @ ErrorCode::RentRefundMismatch)]
    pub rent_refund: UncheckedAccount<'info>,
    #[account(
        address = purchase_list_item.price_model @ ErrorCode::InvalidListItem,
        has_one = market
    )]
    pub price_model: Box<Account<'info, PriceModel>>,
    pub debit_mint: Box<Account<'info, Mint>>,
    #[account(
        mut,
        token::mint = debit_mint,
        token::authority = owner
    )]
    pub debit_account: Box<Account<'info, TokenAccount>>,
    #[account(
        init_if_needed,
        payer = owner,
        associated_token::mint = debit_mint,
        associated_token::authority = market
    )]
    pub program_credit_account: Box<Account<'info, TokenAccount>>,
    #[account(address = purchase_list_item.nft_mint @ ErrorCode::InvalidListItem)]
    pub program_nft_mint: Box<Account<'info, Mint>>,
    #[account(
        mut,
        associated_token::mint = program_nft_mint,
        associated_token::authority = collection
    )]
    pub program_nft_account: Box<Account<'info, TokenAccount>>,
    #[account(
        init_if_needed,
        payer = owner,
        associated_token::mint = program_nft_mint,
        associated_token::authority = owner
    )]
    pub owner_nft_account: Box<Account<'info, TokenAccount>>,
    #[account(mut, address = purchase_list_item.prev_list_item @ ErrorCode::InvalidListItem)]
    pub prev_list_item: Box<Account<'info, NftBucket>>,
    #[account(mut, address = purchase_list_item.next_list_item @ ErrorCode::InvalidListItem)]
    pub next_list_item: Box<Account<'info, NftBucket>>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}
