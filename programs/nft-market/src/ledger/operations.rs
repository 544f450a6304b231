use anchor_lang::error::ErrorCode as AnchorErrorCode;
use anchor_lang::prelude::*;

use super::{rent_for, Ledger, LedgerAccount};
use crate::address::{
    collection_address, global_state_address, list_head_address, list_tail_address,
    market_address, price_model_address,
};
use crate::common::{NATIVE_MINT, TOKEN_ACCOUNT_LEN};
use crate::error::ErrorCode;
use crate::linked_list::{insert_after_head, is_empty, unlink, ListNode};
use crate::state::{Collection, GlobalState, Market, NftBucket, PriceModel, SalePrice};

impl Ledger {
    pub fn init_global_state(&mut self, payer: &Pubkey) -> Result<Pubkey> {
        self.transact(|ledger| {
            let (global_state, nonce) = global_state_address(&ledger.program_id);
            let record = GlobalState {
                nonce,
                num_markets: 0,
            };
            ledger.allocate(global_state, payer, LedgerAccount::GlobalState(record))?;
            Ok(global_state)
        })
    }

    pub fn init_market(
        &mut self,
        admin: &Pubkey,
        whitelist: Vec<Pubkey>,
        title: String,
    ) -> Result<Pubkey> {
        self.transact(|ledger| {
            let (global_state, _) = global_state_address(&ledger.program_id);
            let index = ledger.global_state_mut(&global_state)?.claim_market_index()?;
            let (market, nonce) = market_address(&ledger.program_id, &global_state, index);
            let record = Market::new(nonce, index, *admin, whitelist, title)?;
            ledger.allocate(market, admin, LedgerAccount::Market(record))?;
            Ok(market)
        })
    }

    pub fn add_admin(
        &mut self,
        market: &Pubkey,
        admin: &Pubkey,
        new_admin: &Pubkey,
    ) -> Result<()> {
        self.transact(|ledger| ledger.market_mut(market)?.add_admin(admin, *new_admin))
    }

    pub fn remove_admin(
        &mut self,
        market: &Pubkey,
        admin: &Pubkey,
        removed_admin: &Pubkey,
    ) -> Result<()> {
        self.transact(|ledger| ledger.market_mut(market)?.remove_admin(admin, removed_admin))
    }

    pub fn init_collection(
        &mut self,
        market: &Pubkey,
        admin: &Pubkey,
        title: String,
    ) -> Result<Pubkey> {
        self.transact(|ledger| {
            let program_id = ledger.program_id;
            let record = ledger.market_mut(market)?;
            record.assert_admin(admin)?;
            let index = record.claim_collection_index()?;

            let (collection, nonce) = collection_address(&program_id, market, index);
            let (list_head, head_nonce) = list_head_address(&program_id, &collection);
            let (list_tail, tail_nonce) = list_tail_address(&program_id, &collection);

            let record = Collection::new(nonce, index, list_head, list_tail, title)?;
            ledger.allocate(collection, admin, LedgerAccount::Collection(record))?;
            let head = NftBucket::list_head(head_nonce, collection, *admin, list_tail);
            ledger.allocate(list_head, admin, LedgerAccount::NftBucket(head))?;
            let tail = NftBucket::list_tail(tail_nonce, collection, *admin, list_head);
            ledger.allocate(list_tail, admin, LedgerAccount::NftBucket(tail))?;
            Ok(collection)
        })
    }

    pub fn init_price_model(
        &mut self,
        market: &Pubkey,
        admin: &Pubkey,
        sale_prices: Vec<SalePrice>,
    ) -> Result<Pubkey> {
        self.transact(|ledger| {
            let program_id = ledger.program_id;
            let record = ledger.market_mut(market)?;
            record.assert_admin(admin)?;
            let index = record.claim_price_model_index()?;

            let (price_model, nonce) = price_model_address(&program_id, market, index);
            let record = PriceModel::new(nonce, index, *market, sale_prices)?;
            ledger.allocate(price_model, admin, LedgerAccount::PriceModel(record))?;
            Ok(price_model)
        })
    }

    /// Escrows `nft_mint` under the collection and lists it at `new_item`.
    pub fn add_nft(
        &mut self,
        market: &Pubkey,
        collection: &Pubkey,
        price_model: &Pubkey,
        admin: &Pubkey,
        nft_mint: &Pubkey,
        new_item: &Pubkey,
    ) -> Result<()> {
        self.transact(|ledger| {
            ledger.market(market)?.assert_admin(admin)?;
            let record = ledger.market_collection(market, collection)?;
            ledger.check_price_model(market, price_model)?;
            require!(
                ledger.token_balance(admin, nft_mint) == 1,
                ErrorCode::InvalidNftAmount
            );

            ledger.init_token_account_if_needed(collection, nft_mint, admin)?;
            ledger.transfer_tokens(nft_mint, admin, collection, 1)?;
            let listing = NftBucket::listing(*collection, *nft_mint, *price_model, *admin);
            ledger.allocate(*new_item, admin, LedgerAccount::NftBucket(listing))?;

            let head_key = record.list_head;
            let mut head = ledger.take_bucket(&head_key)?;
            let next_key = head.next_list_item;
            let mut next = ledger.take_bucket(&next_key)?;
            let mut new = ledger.take_bucket(new_item)?;
            insert_after_head(
                ListNode::new(head_key, &mut head),
                ListNode::new(next_key, &mut next),
                ListNode::new(*new_item, &mut new),
            )?;
            ledger.put_bucket(head_key, head);
            ledger.put_bucket(next_key, next);
            ledger.put_bucket(*new_item, new);
            Ok(())
        })
    }

    /// Delists `listing` and hands the escrowed NFT back to the admin.
    pub fn withdraw_nft(
        &mut self,
        market: &Pubkey,
        collection: &Pubkey,
        admin: &Pubkey,
        listing: &Pubkey,
        rent_refund: &Pubkey,
    ) -> Result<()> {
        self.transact(|ledger| {
            ledger.market(market)?.assert_admin(admin)?;
            let item = ledger.listing(market, collection, listing, rent_refund)?;

            ledger.init_token_account_if_needed(admin, &item.nft_mint, admin)?;
            ledger.unlink_listing(listing, &item)?;
            ledger.transfer_tokens(&item.nft_mint, collection, admin, 1)?;
            ledger.close_token_account_if_empty(collection, &item.nft_mint, rent_refund)?;
            ledger.close(listing, rent_refund)
        })
    }

    /// Sells `listing` to `buyer` for the price set in `payment_mint`.
    ///
    /// Native-mint payments are funded from the buyer's lamports through a
    /// single-use wrapped account whose deposit returns to the buyer. The buyer
    /// pays for the market's proceeds account and its own NFT account when
    /// they do not exist yet.
    pub fn purchase_nft(
        &mut self,
        market: &Pubkey,
        collection: &Pubkey,
        buyer: &Pubkey,
        listing: &Pubkey,
        payment_mint: &Pubkey,
        rent_refund: &Pubkey,
    ) -> Result<()> {
        self.transact(|ledger| {
            let item = ledger.listing(market, collection, listing, rent_refund)?;
            ledger.check_price_model(market, &item.price_model)?;
            let amount = ledger
                .price_model(&item.price_model)?
                .sale_price(payment_mint)?
                .amount;

            ledger.init_token_account_if_needed(market, payment_mint, buyer)?;
            ledger.init_token_account_if_needed(buyer, &item.nft_mint, buyer)?;
            if *payment_mint == NATIVE_MINT {
                let deposit = rent_for(TOKEN_ACCOUNT_LEN);
                let funding = amount.checked_add(deposit).ok_or(ErrorCode::Overflow)?;
                ledger.debit_lamports(buyer, funding)?;
                ledger.credit_tokens(market, &NATIVE_MINT, amount)?;
                ledger.credit_lamports(buyer, deposit)?;
            } else {
                ledger.transfer_tokens(payment_mint, buyer, market, amount)?;
            }

            ledger.transfer_tokens(&item.nft_mint, collection, buyer, 1)?;
            ledger.close_token_account_if_empty(collection, &item.nft_mint, rent_refund)?;
            ledger.unlink_listing(listing, &item)?;
            ledger.close(listing, rent_refund)
        })
    }

    pub fn withdraw_liquidity(
        &mut self,
        market: &Pubkey,
        admin: &Pubkey,
        mint: &Pubkey,
        amount: u64,
    ) -> Result<()> {
        self.transact(|ledger| {
            let record = ledger.market(market)?;
            let (global_state, _) = global_state_address(&ledger.program_id);
            let (expected, _) = market_address(&ledger.program_id, &global_state, record.index);
            if expected != *market {
                return Err(AnchorErrorCode::ConstraintSeeds.into());
            }
            record.assert_admin(admin)?;
            ledger.init_token_account_if_needed(admin, mint, admin)?;
            ledger.transfer_tokens(mint, market, admin, amount)
        })
    }

    /// Closes an empty collection together with its sentinels.
    pub fn close_collection(
        &mut self,
        market: &Pubkey,
        collection: &Pubkey,
        admin: &Pubkey,
        rent_refund: &Pubkey,
    ) -> Result<()> {
        self.transact(|ledger| {
            ledger.market(market)?.assert_admin(admin)?;
            let record = ledger.market_collection(market, collection)?;
            ledger.nft_bucket(&record.list_tail)?;
            require!(
                is_empty(ledger.nft_bucket(&record.list_head)?, &record.list_tail),
                ErrorCode::CollectionNonEmpty
            );

            ledger.close(&record.list_head, rent_refund)?;
            ledger.close(&record.list_tail, rent_refund)?;
            ledger.close(collection, rent_refund)
        })
    }

    fn check_price_model(&self, market: &Pubkey, price_model: &Pubkey) -> Result<()> {
        let record = self.price_model(price_model)?;
        if record.market != *market {
            return Err(AnchorErrorCode::ConstraintHasOne.into());
        }
        let (expected, _) = price_model_address(&self.program_id, market, record.index);
        if expected != *price_model {
            return Err(AnchorErrorCode::ConstraintSeeds.into());
        }
        Ok(())
    }

    /// A non-sentinel listing of `collection` whose rent goes back to `rent_refund`.
    fn listing(
        &self,
        market: &Pubkey,
        collection: &Pubkey,
        listing: &Pubkey,
        rent_refund: &Pubkey,
    ) -> Result<NftBucket> {
        let record = self.market_collection(market, collection)?;
        require!(!record.is_sentinel(listing), ErrorCode::InvalidListItem);
        let item = self.nft_bucket(listing)?.clone();
        require_keys_eq!(item.collection, *collection, ErrorCode::InvalidListItem);
        require_keys_eq!(*rent_refund, item.payer, ErrorCode::RentRefundMismatch);
        Ok(item)
    }

    fn unlink_listing(&mut self, key: &Pubkey, item: &NftBucket) -> Result<()> {
        let prev_key = item.prev_list_item;
        let next_key = item.next_list_item;
        let mut prev = self.take_bucket(&prev_key)?;
        let mut next = self.take_bucket(&next_key)?;
        unlink(
            *key,
            item,
            ListNode::new(prev_key, &mut prev),
            ListNode::new(next_key, &mut next),
        )?;
        self.put_bucket(prev_key, prev);
        self.put_bucket(next_key, next);
        Ok(())
    }
}
