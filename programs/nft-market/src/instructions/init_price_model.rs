use anchor_lang::prelude::*;
use crate::common::{PriceModelInitialized, PRICE_MODEL_SEED};
use crate::error::ErrorCode;
use crate::state::{Market, PriceModel, SalePrice};

pub fn init_price_model_impl(
    ctx: Context<InitPriceModel>,
    sale_prices: Vec<SalePrice>,
) -> Result<()> {
    let market_key = ctx.accounts.market.key();
    let index = ctx.accounts.market.claim_price_model_index()?;
    let price_model = PriceModel::new(ctx.bumps.price_model, index, market_key, sale_prices)?;

    msg!("Initialized price model {} with {} sale prices", index, price_model.sale_prices.len());
    emit!(PriceModelInitialized {
        market: market_key,
        price_model: ctx.accounts.price_model.key(),
        index,
        sale_prices: price_model.sale_prices.clone(),
    });
    ctx.accounts.price_model.set_inner(price_model);
    Ok(())
}

#[derive(Accounts)]
pub struct InitPriceModel<'info> {
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
        space = PriceModel::LEN,
        seeds = [
            market.key().as_ref(),
            &market.num_price_models.to_le_bytes(),
            PRICE_MODEL_SEED
        ],
        bump
    )]
    pub price_model: Box<Account<'info, PriceModel>>,
    pub system_program: Program<'info, System>,
}
