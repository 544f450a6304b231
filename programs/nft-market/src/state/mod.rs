mod global_state;
mod market;
mod price_model;
mod collection;
mod nft_bucket;

pub use global_state::*;
pub use market::*;
pub use price_model::*;
pub use collection::*;
pub use nft_bucket::*;
