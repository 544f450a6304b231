use anchor_lang::prelude::*;
use crate::common::{MAX_ADMINS, MAX_TITLE_LEN};
use crate::error::ErrorCode;

#[account]
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Market {
    pub nonce: u8,
    pub index: u32,
    pub whitelist: Vec<Pubkey>,
    pub num_collections: u32,
    pub num_price_models: u32,
    pub title: String,
}

impl Market {
    pub const LEN: usize = 8 + 1 + 4 + (4 + 32 * MAX_ADMINS) + 4 + 4 + (4 + MAX_TITLE_LEN);

    /// Builds a market whose whitelist always contains `creator`. The creator is
    /// put in front when the supplied whitelist does not already name it.
    pub fn new(
        nonce: u8,
        index: u32,
        creator: Pubkey,
        whitelist: Vec<Pubkey>,
        title: String,
    ) -> Result<Self> {
        require!(title.len() <= MAX_TITLE_LEN, ErrorCode::TitleTooLong);

        let mut admins = Vec::with_capacity(whitelist.len() + 1);
        if !whitelist.contains(&creator) {
            admins.push(creator);
        }
        for admin in whitelist {
            if admins.contains(&admin) {
                msg!("Duplicate whitelist entry accepted: {}", admin);
            }
            admins.push(admin);
        }
        require!(admins.len() <= MAX_ADMINS, ErrorCode::AdminOutOfBounds);

        Ok(Self {
            nonce,
            index,
            whitelist: admins,
            num_collections: 0,
            num_price_models: 0,
            title,
        })
    }

    pub fn is_admin(&self, key: &Pubkey) -> bool {
        self.whitelist.contains(key)
    }

    pub fn assert_admin(&self, key: &Pubkey) -> Result<()> {
        require!(self.is_admin(key), ErrorCode::Unauthorized);
        Ok(())
    }

    pub fn add_admin(&mut self, admin: &Pubkey, target: Pubkey) -> Result<()> {
        self.assert_admin(admin)?;
        require!(self.whitelist.len() < MAX_ADMINS, ErrorCode::AdminOutOfBounds);
        if self.is_admin(&target) {
            msg!("Duplicate whitelist entry accepted: {}", target);
        }
        self.whitelist.push(target);
        Ok(())
    }

    /// Removes the first whitelist entry equal to `target`.
    pub fn remove_admin(&mut self, admin: &Pubkey, target: &Pubkey) -> Result<()> {
        self.assert_admin(admin)?;
        require!(admin != target, ErrorCode::CannotRemoveSelf);
        let position = self
            .whitelist
            .iter()
            .position(|key| key == target)
            .ok_or(ErrorCode::AdminNotFound)?;
        self.whitelist.remove(position);
        Ok(())
    }

    pub fn claim_collection_index(&mut self) -> Result<u32> {
        let index = self.num_collections;
        self.num_collections = self
            .num_collections
            .checked_add(1)
            .ok_or(ErrorCode::Overflow)?;
        Ok(index)
    }

    pub fn claim_price_model_index(&mut self) -> Result<u32> {
        let index = self.num_price_models;
        self.num_price_models = self
            .num_price_models
            .checked_add(1)
            .ok_or(ErrorCode::Overflow)?;
        Ok(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn market_with(admin: Pubkey) -> Market {
        Market::new(254, 0, admin, vec![], "Market A".to_string()).unwrap()
    }

    #[test]
    fn test_new_market_includes_creator() {
        let creator = Pubkey::new_unique();
        let other = Pubkey::new_unique();

        let market = Market::new(1, 3, creator, vec![other], "Market".to_string()).unwrap();
        assert_eq!(market.whitelist, vec![creator, other]);
        assert_eq!(market.index, 3);
        assert_eq!(market.num_collections, 0);
        assert_eq!(market.num_price_models, 0);

        let market = Market::new(1, 0, creator, vec![other, creator], "Market".to_string()).unwrap();
        assert_eq!(market.whitelist, vec![other, creator]);
    }

    #[test]
    fn test_new_market_bounds() {
        let creator = Pubkey::new_unique();
        let long_title = "x".repeat(MAX_TITLE_LEN + 1);
        let err = Market::new(1, 0, creator, vec![], long_title).unwrap_err();
        assert_eq!(err, ErrorCode::TitleTooLong.into());

        let full: Vec<Pubkey> = (0..MAX_ADMINS).map(|_| Pubkey::new_unique()).collect();
        let err = Market::new(1, 0, creator, full, String::new()).unwrap_err();
        assert_eq!(err, ErrorCode::AdminOutOfBounds.into());

        let mut almost_full: Vec<Pubkey> = (0..MAX_ADMINS - 1).map(|_| Pubkey::new_unique()).collect();
        almost_full.push(creator);
        let market = Market::new(1, 0, creator, almost_full, String::new()).unwrap();
        assert_eq!(market.whitelist.len(), MAX_ADMINS);
    }

    #[test]
    fn test_add_admin_until_full() {
        let admin = Pubkey::new_unique();
        let mut market = market_with(admin);

        for _ in 1..MAX_ADMINS {
            market.add_admin(&admin, Pubkey::new_unique()).unwrap();
        }
        assert_eq!(market.whitelist.len(), MAX_ADMINS);

        let err = market.add_admin(&admin, Pubkey::new_unique()).unwrap_err();
        assert_eq!(err, ErrorCode::AdminOutOfBounds.into());
        assert_eq!(market.whitelist.len(), MAX_ADMINS);
    }

    #[test]
    fn test_add_admin_requires_admin() {
        let admin = Pubkey::new_unique();
        let outsider = Pubkey::new_unique();
        let mut market = market_with(admin);

        let err = market.add_admin(&outsider, outsider).unwrap_err();
        assert_eq!(err, ErrorCode::Unauthorized.into());
        assert!(!market.is_admin(&outsider));
    }

    #[test]
    fn test_add_duplicate_admin_is_accepted() {
        let admin = Pubkey::new_unique();
        let mut market = market_with(admin);
        market.add_admin(&admin, admin).unwrap();
        assert_eq!(market.whitelist, vec![admin, admin]);
    }

    #[test]
    fn test_remove_admin() {
        let admin = Pubkey::new_unique();
        let other = Pubkey::new_unique();
        let mut market = market_with(admin);
        market.add_admin(&admin, other).unwrap();
        market.add_admin(&admin, other).unwrap();

        market.remove_admin(&admin, &other).unwrap();
        assert_eq!(market.whitelist, vec![admin, other]);

        market.remove_admin(&admin, &other).unwrap();
        assert_eq!(market.whitelist, vec![admin]);

        let err = market.remove_admin(&admin, &other).unwrap_err();
        assert_eq!(err, ErrorCode::AdminNotFound.into());
    }

    #[test]
    fn test_remove_self_always_fails() {
        let admin = Pubkey::new_unique();
        let mut market = market_with(admin);

        let err = market.remove_admin(&admin, &admin).unwrap_err();
        assert_eq!(err, ErrorCode::CannotRemoveSelf.into());

        for _ in 1..MAX_ADMINS {
            market.add_admin(&admin, Pubkey::new_unique()).unwrap();
        }
        let err = market.remove_admin(&admin, &admin).unwrap_err();
        assert_eq!(err, ErrorCode::CannotRemoveSelf.into());
        assert_eq!(market.whitelist.len(), MAX_ADMINS);
    }

    #[test]
    fn test_remove_admin_requires_admin() {
        let admin = Pubkey::new_unique();
        let outsider = Pubkey::new_unique();
        let mut market = market_with(admin);

        let err = market.remove_admin(&outsider, &admin).unwrap_err();
        assert_eq!(err, ErrorCode::Unauthorized.into());
        assert_eq!(market.whitelist, vec![admin]);
    }

    #[test]
    fn test_counters_are_monotonic() {
        let mut market = market_with(Pubkey::new_unique());
        assert_eq!(market.claim_collection_index().unwrap(), 0);
        assert_eq!(market.claim_collection_index().unwrap(), 1);
        assert_eq!(market.claim_price_model_index().unwrap(), 0);
        assert_eq!(market.num_collections, 2);
        assert_eq!(market.num_price_models, 1);

        market.num_price_models = u32::MAX;
        let err = market.claim_price_model_index().unwrap_err();
        assert_eq!(err, ErrorCode::Overflow.into());
    }

    #[test]
    fn test_market_fits_in_allocated_space() {
        let admin = Pubkey::new_unique();
        let mut market = Market::new(255, u32::MAX, admin, vec![], "t".repeat(MAX_TITLE_LEN)).unwrap();
        for _ in 1..MAX_ADMINS {
            market.add_admin(&admin, Pubkey::new_unique()).unwrap();
        }
        let mut data = Vec::new();
        market.try_serialize(&mut data).unwrap();
        assert_eq!(data.len(), Market::LEN);
    }
}
