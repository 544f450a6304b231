use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token::{Mint, Token, TokenAccount};
use crate::common::{LiquidityWithdrawn, GLOBAL_STATE_SEED};
use crate::error::ErrorCode;
use crate::instructions::common::transfer_tokens;
use crate::market_seeds;
use crate::state::{GlobalState, Market};

pub fn withdraw_liquidity_impl(ctx: Context<WithdrawLiquidity>, amount: u64) -> Result<()> {
    let accounts = &ctx.accounts;

    let global_state_key = accounts.global_state.key();
    let seeds: &[&[u8]] = market_seeds!(global_state_key, accounts.market);
    transfer_tokens(
        &accounts.token_program,
        &accounts.program_debit_account,
        &accounts.admin_credit_account,
        accounts.market.to_account_info(),
        &[seeds],
        amount,
    )?;

    let mint = accounts.withdraw_mint.key();
    msg!("Admin {} withdrew {} of {}", accounts.admin.key(), amount, mint);
    emit!(LiquidityWithdrawn {
        market: accounts.market.key(),
        admin: accounts.admin.key(),
        mint,
        amount,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct WithdrawLiquidity<'info> {
    #[account(mut)]
    pub admin: Signer<'info>,
    #[account(
        seeds = [GLOBAL_STATE_SEED],
        bump = global_state.nonce
    )]
    pub global_state: Account<'info, GlobalState>,
    #[account(
        seeds = [
            global_state.key().as_ref(),
            &market.index.to_le_bytes()
        ],
        bump = market.nonce,
        constraint = market.is_admin(&admin.key()) @ ErrorCode::Unauthorized
    )]
    pub market: Box<Account<'info, Market>>,
    pub withdraw_mint: Box<Account<'info, Mint>>,
    #[account(
        mut,
        associated_token::mint = withdraw_mint,
        associated_token::authority = market
    )]
    pub program_debit_account: Box<Account<'info, TokenAccount>>,
    #[account(
        init_if_needed,
        payer = admin,
        associated_token::mint = withdraw_mint,
        associated_token::authority = admin
    )]
    pub admin_credit_account: Box<Account<'info, TokenAccount>>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}
