use anchor_lang::prelude::*;
use crate::common::GLOBAL_STATE_SEED;
use crate::state::GlobalState;

pub fn init_global_state_impl(ctx: Context<InitGlobalState>) -> Result<()> {
    let global_state = &mut ctx.accounts.global_state;
    global_state.nonce = ctx.bumps.global_state;
    global_state.num_markets = 0;

    msg!("Initialized global state: {}", global_state.key());
    Ok(())
}

#[derive(Accounts)]
pub struct InitGlobalState<'info> {
    #[account(mut)]
    pub admin: Signer<'info>,
    #[account(
        init,
        payer = admin,
        space = GlobalState::LEN,
        seeds = [GLOBAL_STATE_SEED],
        bump
    )]
    pub global_state: Account<'info, GlobalState>,
    pub system_program: Program<'info, System>,
}
