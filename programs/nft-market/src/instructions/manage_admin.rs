use anchor_lang::prelude::*;
use crate::common::{AdminAdded, AdminRemoved};
use crate::state::Market;

pub fn add_admin_impl(ctx: Context<AddAdmin>) -> Result<()> {
    let admin = ctx.accounts.admin.key();
    let added = ctx.accounts.new_admin.key();
    ctx.accounts.market.add_admin(&admin, added)?;

    msg!("Admin {} added {} to the whitelist", admin, added);
    emit!(AdminAdded {
        market: ctx.accounts.market.key(),
        admin,
        added,
    });
    Ok(())
}

pub fn remove_admin_impl(ctx: Context<RemoveAdmin>) -> Result<()> {
    let admin = ctx.accounts.admin.key();
    let removed = ctx.accounts.removed_admin.key();
    ctx.accounts.market.remove_admin(&admin, &removed)?;

    msg!("Admin {} removed {} from the whitelist", admin, removed);
    emit!(AdminRemoved {
        market: ctx.accounts.market.key(),
        admin,
        removed,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct AddAdmin<'info> {
    pub admin: Signer<'info>,
    #[account(mut)]
    pub market: Box<Account<'info, Market>>,
    /// CHECK: only the address is recorded in the whitelist
    pub new_admin: UncheckedAccount<'info>,
}

#[derive(Accounts)]
pub struct RemoveAdmin<'info> {
    pub admin: Signer<'info>,
    #[account(mut)]
    pub market: Box<Account<'info, Market>>,
    /// CHECK: only the address is looked up in the whitelist
    pub removed_admin: UncheckedAccount<'info>,
}
