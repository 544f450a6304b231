//! In-memory replica of the program's accounts.
//!
//! Records are kept in an arena keyed by address, token balances by
//! (owner, mint) and lamports by address. Associated token accounts are
//! created and closed with their rent deposits the way the program does, so
//! lamport balances track the chain. Every operation runs against a snapshot
//! that replaces the live state only when the operation succeeds, which
//! mirrors how the runtime commits or discards a whole instruction.

mod operations;
#[cfg(test)]
mod tests;

use std::collections::BTreeMap;

use anchor_lang::error::ErrorCode as AnchorErrorCode;
use anchor_lang::prelude::*;
use anchor_spl::associated_token::get_associated_token_address;
use crate::address::collection_address;
use crate::common::TOKEN_ACCOUNT_LEN;
use crate::error::ErrorCode;
use crate::linked_list::ListIter;
use crate::state::{Collection, GlobalState, Market, NftBucket, PriceModel};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerAccount {
    GlobalState(GlobalState),
    Market(Market),
    Collection(Collection),
    PriceModel(PriceModel),
    NftBucket(NftBucket),
}

impl LedgerAccount {
    pub fn space(&self) -> usize {
        match self {
            LedgerAccount::GlobalState(_) => GlobalState::LEN,
            LedgerAccount::Market(_) => Market::LEN,
            LedgerAccount::Collection(_) => Collection::LEN,
            LedgerAccount::PriceModel(_) => PriceModel::LEN,
            LedgerAccount::NftBucket(_) => NftBucket::LEN,
        }
    }
}

/// Rent-exempt deposit for an account of `space` bytes.
pub fn rent_for(space: usize) -> u64 {
    Rent::default().minimum_balance(space)
}

macro_rules! record_accessors {
    ($variant:ident, $get:ident) => {
        pub fn $get(&self, key: &Pubkey) -> Result<&$variant> {
            match self.accounts.get(key) {
                Some(LedgerAccount::$variant(record)) => Ok(record),
                Some(_) => Err(AnchorErrorCode::AccountDiscriminatorMismatch.into()),
                None => Err(AnchorErrorCode::AccountNotInitialized.into()),
            }
        }
    };
    ($variant:ident, $get:ident, $get_mut:ident) => {
        record_accessors!($variant, $get);

        fn $get_mut(&mut self, key: &Pubkey) -> Result<&mut $variant> {
            match self.accounts.get_mut(key) {
                Some(LedgerAccount::$variant(record)) => Ok(record),
                Some(_) => Err(AnchorErrorCode::AccountDiscriminatorMismatch.into()),
                None => Err(AnchorErrorCode::AccountNotInitialized.into()),
            }
        }
    };
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ledger {
    program_id: Pubkey,
    accounts: BTreeMap<Pubkey, LedgerAccount>,
    token_balances: BTreeMap<(Pubkey, Pubkey), u64>,
    lamports: BTreeMap<Pubkey, u64>,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new(crate::ID)
    }
}

impl Ledger {
    pub fn new(program_id: Pubkey) -> Self {
        Self {
            program_id,
            accounts: BTreeMap::new(),
            token_balances: BTreeMap::new(),
            lamports: BTreeMap::new(),
        }
    }

    pub fn program_id(&self) -> &Pubkey {
        &self.program_id
    }

    record_accessors!(GlobalState, global_state, global_state_mut);
    record_accessors!(Market, market, market_mut);
    record_accessors!(Collection, collection);
    record_accessors!(PriceModel, price_model);
    record_accessors!(NftBucket, nft_bucket);

    pub fn exists(&self, key: &Pubkey) -> bool {
        self.accounts.contains_key(key)
    }

    pub fn lamports(&self, key: &Pubkey) -> u64 {
        self.lamports.get(key).copied().unwrap_or(0)
    }

    pub fn token_balance(&self, owner: &Pubkey, mint: &Pubkey) -> u64 {
        self.token_balances.get(&(*owner, *mint)).copied().unwrap_or(0)
    }

    pub fn token_account_exists(&self, owner: &Pubkey, mint: &Pubkey) -> bool {
        self.token_balances.contains_key(&(*owner, *mint))
    }

    /// Funds a wallet with lamports.
    pub fn airdrop(&mut self, key: &Pubkey, lamports: u64) -> Result<()> {
        self.transact(|ledger| ledger.credit_lamports(key, lamports))
    }

    /// Mints `amount` of `mint` into `owner`'s token account. A missing account
    /// is created with its deposit paid by the minter, outside the ledger.
    pub fn mint_to(&mut self, owner: &Pubkey, mint: &Pubkey, amount: u64) -> Result<()> {
        self.transact(|ledger| {
            if !ledger.token_account_exists(owner, mint) {
                let address = get_associated_token_address(owner, mint);
                ledger.credit_lamports(&address, rent_for(TOKEN_ACCOUNT_LEN))?;
                ledger.token_balances.insert((*owner, *mint), 0);
            }
            ledger.credit_tokens(owner, mint, amount)
        })
    }

    /// Listings of a collection from the head sentinel to the tail sentinel.
    pub fn collection_listings(&self, collection: &Pubkey) -> Result<Vec<Pubkey>> {
        let collection = self.collection(collection)?;
        let list_head = self.nft_bucket(&collection.list_head)?;
        ListIter::forward(list_head, collection.list_tail, self.accounts.len(), |key| {
            self.nft_bucket(key).ok()
        })
        .map(|entry| entry.map(|(key, _)| key))
        .collect()
    }

    /// Listings of a collection walked from the tail sentinel back to the head.
    pub fn collection_listings_reversed(&self, collection: &Pubkey) -> Result<Vec<Pubkey>> {
        let collection = self.collection(collection)?;
        let list_tail = self.nft_bucket(&collection.list_tail)?;
        ListIter::backward(list_tail, collection.list_head, self.accounts.len(), |key| {
            self.nft_bucket(key).ok()
        })
        .map(|entry| entry.map(|(key, _)| key))
        .collect()
    }

    /// Runs `op` on a snapshot and commits it only if `op` succeeds.
    fn transact<T>(&mut self, op: impl FnOnce(&mut Ledger) -> Result<T>) -> Result<T> {
        let mut draft = self.clone();
        let output = op(&mut draft)?;
        *self = draft;
        Ok(output)
    }

    fn allocate(&mut self, key: Pubkey, payer: &Pubkey, account: LedgerAccount) -> Result<()> {
        if self.accounts.contains_key(&key) {
            return Err(ProgramError::AccountAlreadyInitialized.into());
        }
        let rent = rent_for(account.space());
        self.debit_lamports(payer, rent)?;
        self.credit_lamports(&key, rent)?;
        self.accounts.insert(key, account);
        Ok(())
    }

    fn close(&mut self, key: &Pubkey, rent_refund: &Pubkey) -> Result<()> {
        if self.accounts.remove(key).is_none() {
            return Err(AnchorErrorCode::AccountNotInitialized.into());
        }
        let lamports = self.lamports.remove(key).unwrap_or(0);
        self.credit_lamports(rent_refund, lamports)
    }

    /// Detaches a list node from the arena so it can be borrowed alongside others.
    fn take_bucket(&mut self, key: &Pubkey) -> Result<NftBucket> {
        match self.accounts.remove(key) {
            Some(LedgerAccount::NftBucket(bucket)) => Ok(bucket),
            Some(_) => Err(AnchorErrorCode::AccountDiscriminatorMismatch.into()),
            None => Err(AnchorErrorCode::AccountNotInitialized.into()),
        }
    }

    fn put_bucket(&mut self, key: Pubkey, bucket: NftBucket) {
        self.accounts.insert(key, LedgerAccount::NftBucket(bucket));
    }

    /// Collection that is derived from `market`, as the seeds constraint demands.
    fn market_collection(&self, market: &Pubkey, collection: &Pubkey) -> Result<Collection> {
        let record = self.collection(collection)?.clone();
        let (expected, _) = collection_address(&self.program_id, market, record.index);
        if expected != *collection {
            return Err(AnchorErrorCode::ConstraintSeeds.into());
        }
        Ok(record)
    }

    fn credit_lamports(&mut self, key: &Pubkey, amount: u64) -> Result<()> {
        let balance = self.lamports.entry(*key).or_default();
        *balance = balance.checked_add(amount).ok_or(ErrorCode::Overflow)?;
        Ok(())
    }

    fn debit_lamports(&mut self, key: &Pubkey, amount: u64) -> Result<()> {
        let balance = self.lamports.entry(*key).or_default();
        *balance = balance.checked_sub(amount).ok_or(ErrorCode::Overflow)?;
        Ok(())
    }

    /// Creates `owner`'s associated account for `mint` at `payer`'s expense
    /// unless it already exists.
    fn init_token_account_if_needed(
        &mut self,
        owner: &Pubkey,
        mint: &Pubkey,
        payer: &Pubkey,
    ) -> Result<()> {
        if self.token_account_exists(owner, mint) {
            return Ok(());
        }
        let rent = rent_for(TOKEN_ACCOUNT_LEN);
        self.debit_lamports(payer, rent)?;
        self.credit_lamports(&get_associated_token_address(owner, mint), rent)?;
        self.token_balances.insert((*owner, *mint), 0);
        Ok(())
    }

    /// Closes `owner`'s token account for `mint` once it is empty.
    fn close_token_account_if_empty(
        &mut self,
        owner: &Pubkey,
        mint: &Pubkey,
        destination: &Pubkey,
    ) -> Result<()> {
        if self.token_balance(owner, mint) != 0 {
            return Ok(());
        }
        if self.token_balances.remove(&(*owner, *mint)).is_none() {
            return Err(AnchorErrorCode::AccountNotInitialized.into());
        }
        let address = get_associated_token_address(owner, mint);
        let lamports = self.lamports.remove(&address).unwrap_or(0);
        self.credit_lamports(destination, lamports)
    }

    fn token_balance_mut(&mut self, owner: &Pubkey, mint: &Pubkey) -> Result<&mut u64> {
        self.token_balances
            .get_mut(&(*owner, *mint))
            .ok_or_else(|| AnchorErrorCode::AccountNotInitialized.into())
    }

    fn credit_tokens(&mut self, owner: &Pubkey, mint: &Pubkey, amount: u64) -> Result<()> {
        let balance = self.token_balance_mut(owner, mint)?;
        *balance = balance.checked_add(amount).ok_or(ErrorCode::Overflow)?;
        Ok(())
    }

    fn debit_tokens(&mut self, owner: &Pubkey, mint: &Pubkey, amount: u64) -> Result<()> {
        let balance = self.token_balance_mut(owner, mint)?;
        *balance = balance.checked_sub(amount).ok_or(ErrorCode::Overflow)?;
        Ok(())
    }

    fn transfer_tokens(
        &mut self,
        mint: &Pubkey,
        from: &Pubkey,
        to: &Pubkey,
        amount: u64,
    ) -> Result<()> {
        self.debit_tokens(from, mint, amount)?;
        self.credit_tokens(to, mint, amount)
    }
}
