mod common;
pub mod init_global_state;
pub mod init_market;
pub mod manage_admin;
pub mod init_collection;
pub mod init_price_model;
pub mod add_nft;
pub mod withdraw_nft;
pub mod purchase_nft;
pub mod withdraw_liquidity;
pub mod close_collection;

pub use init_global_state::*;
pub use init_market::*;
pub use manage_admin::*;
pub use init_collection::*;
pub use init_price_model::*;
pub use add_nft::*;
pub use withdraw_nft::*;
pub use purchase_nft::*;
pub use withdraw_liquidity::*;
pub use close_collection::*;
