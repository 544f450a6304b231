use anchor_lang::prelude::*;

pub mod address;
pub mod common;
pub mod error;
pub mod instructions;
pub mod linked_list;
pub mod state;

#[cfg(not(target_os = "solana"))]
pub mod ledger;

pub use instructions::*;
pub use state::*;

declare_id!("9DfieBq8LQx3DsdscYfz35KGcof3rbx8PJ7vDBA2Q33b");

#[program]
pub mod nft_market {
    use super::*;

    /// Create the singleton that counts markets
    pub fn init_global_state(ctx: Context<InitGlobalState>) -> Result<()> {
        init_global_state_impl(ctx)
    }

    /// Create a market governed by `whitelist`; the signer is always an admin
    pub fn init_market(
        ctx: Context<InitMarket>,
        whitelist: Vec<Pubkey>,
        title: String,
    ) -> Result<()> {
        init_market_impl(ctx, whitelist, title)
    }

    pub fn add_admin(ctx: Context<AddAdmin>) -> Result<()> {
        add_admin_impl(ctx)
    }

    pub fn remove_admin(ctx: Context<RemoveAdmin>) -> Result<()> {
        remove_admin_impl(ctx)
    }

    /// Create a collection together with its empty listing list
    pub fn init_collection(ctx: Context<InitCollection>, title: String) -> Result<()> {
        init_collection_impl(ctx, title)
    }

    pub fn init_price_model(
        ctx: Context<InitPriceModel>,
        sale_prices: Vec<SalePrice>,
    ) -> Result<()> {
        init_price_model_impl(ctx, sale_prices)
    }

    /// Escrow one NFT and list it at the front of the collection
    pub fn add_nft(ctx: Context<AddNft>) -> Result<()> {
        add_nft_impl(ctx)
    }

    pub fn withdraw_nft(ctx: Context<WithdrawNft>) -> Result<()> {
        withdraw_nft_impl(ctx)
    }

    /// Buy a listing in any mint its price model accepts. A native-mint debit
    /// account is closed back to the buyer after paying.
    pub fn purchase_nft(ctx: Context<PurchaseNft>) -> Result<()> {
        purchase_nft_impl(ctx)
    }

    pub fn withdraw_liquidity(ctx: Context<WithdrawLiquidity>, amount: u64) -> Result<()> {
        withdraw_liquidity_impl(ctx, amount)
    }

    pub fn close_collection(ctx: Context<CloseCollection>) -> Result<()> {
        close_collection_impl(ctx)
    }
}
