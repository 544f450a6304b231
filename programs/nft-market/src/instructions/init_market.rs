use anchor_lang::prelude::*;
use crate::common::{MarketInitialized, GLOBAL_STATE_SEED};
use crate::state::{GlobalState, Market};

pub fn init_market_impl(
    ctx: Context<InitMarket>,
    whitelist: Vec<Pubkey>,
    title: String,
) -> Result<()> {
    let admin = ctx.accounts.admin.key();
    let index = ctx.accounts.global_state.claim_market_index()?;
    let market = Market::new(ctx.bumps.market, index, admin, whitelist, title)?;

    msg!("Initialized market {} with {} admins", index, market.whitelist.len());
    emit!(MarketInitialized {
        market: ctx.accounts.market.key(),
        index,
        admin,
        title: market.title.clone(),
    });
    ctx.accounts.market.set_inner(market);
    Ok(())
}

#[derive(Accounts)]
pub struct InitMarket<'info> {
    #[account(mut)]
    pub admin: Signer<'info>,
    #[account(
        mut,
        seeds = [GLOBAL_STATE_SEED],
        bump = global_state.nonce
    )]
    pub global_state: Account<'info, GlobalState>,
    #[account(
        init,
        payer = admin,
        space = Market::LEN,
        seeds = [
            global_state.key().as_ref(),
            &global_state.num_markets.to_le_bytes()
        ],
        bump
    )]
    pub market: Box<Account<'info, Market>>,
    pub system_program: Program<'info, System>,
}
