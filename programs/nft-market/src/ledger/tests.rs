use super::*;
use crate::address::{global_state_address, market_address};
use crate::common::{MAX_ADMINS, NATIVE_MINT, TOKEN_ACCOUNT_LEN};
use crate::state::SalePrice;

const SOL: u64 = 1_000_000_000;

struct TestMarket {
    ledger: Ledger,
    admin: Pubkey,
    market: Pubkey,
    collection: Pubkey,
    price_model: Pubkey,
    mint_x: Pubkey,
}

impl TestMarket {
    fn new() -> Self {
        let mut ledger = Ledger::default();
        let admin = Pubkey::new_unique();
        ledger.airdrop(&admin, 10 * SOL).unwrap();
        ledger.init_global_state(&admin).unwrap();
        let market = ledger
            .init_market(&admin, vec![], "Vibe".to_string())
            .unwrap();
        let collection = ledger
            .init_collection(&market, &admin, "Collection A".to_string())
            .unwrap();
        let mint_x = Pubkey::new_unique();
        let price_model = ledger
            .init_price_model(&market, &admin, vec![SalePrice { mint: mint_x, amount: 100 }])
            .unwrap();
        Self {
            ledger,
            admin,
            market,
            collection,
            price_model,
            mint_x,
        }
    }

    fn list_nft(&mut self) -> (Pubkey, Pubkey) {
        let price_model = self.price_model;
        self.list_nft_with(&price_model)
    }

    fn list_nft_with(&mut self, price_model: &Pubkey) -> (Pubkey, Pubkey) {
        let nft_mint = Pubkey::new_unique();
        let collection = self.collection;
        let listing = self.list_mint(&collection, price_model, &nft_mint);
        (listing, nft_mint)
    }

    /// Mints one unit of `nft_mint` to the admin and lists it in `collection`.
    fn list_mint(
        &mut self,
        collection: &Pubkey,
        price_model: &Pubkey,
        nft_mint: &Pubkey,
    ) -> Pubkey {
        let listing = Pubkey::new_unique();
        self.ledger.mint_to(&self.admin, nft_mint, 1).unwrap();
        self.ledger
            .add_nft(&self.market, collection, price_model, &self.admin, nft_mint, &listing)
            .unwrap();
        listing
    }

    fn buyer(&mut self, balance: u64) -> Pubkey {
        let buyer = Pubkey::new_unique();
        self.ledger.airdrop(&buyer, SOL).unwrap();
        self.ledger.mint_to(&buyer, &self.mint_x, balance).unwrap();
        buyer
    }

    fn purchase(&mut self, buyer: &Pubkey, listing: &Pubkey) -> Result<()> {
        self.ledger.purchase_nft(
            &self.market,
            &self.collection,
            buyer,
            listing,
            &self.mint_x,
            &self.admin,
        )
    }

    fn withdraw(&mut self, listing: &Pubkey) -> Result<()> {
        self.ledger
            .withdraw_nft(&self.market, &self.collection, &self.admin, listing, &self.admin)
    }

    fn listings(&self) -> Vec<Pubkey> {
        self.ledger.collection_listings(&self.collection).unwrap()
    }

    fn listings_reversed(&self) -> Vec<Pubkey> {
        self.ledger
            .collection_listings_reversed(&self.collection)
            .unwrap()
    }
}

#[test]
fn test_purchase_moves_payment_and_nft() {
    let mut m = TestMarket::new();
    let (listing, nft_mint) = m.list_nft();
    assert_eq!(m.listings(), vec![listing]);
    assert_eq!(m.ledger.token_balance(&m.collection, &nft_mint), 1);

    let buyer = m.buyer(150);
    m.purchase(&buyer, &listing).unwrap();

    assert_eq!(m.ledger.token_balance(&buyer, &m.mint_x), 50);
    assert_eq!(m.ledger.token_balance(&m.market, &m.mint_x), 100);
    assert_eq!(m.ledger.token_balance(&buyer, &nft_mint), 1);
    assert_eq!(m.ledger.token_balance(&m.collection, &nft_mint), 0);
    assert!(!m.ledger.exists(&listing));
    assert!(m.listings().is_empty());

    m.ledger
        .close_collection(&m.market, &m.collection, &m.admin, &m.admin)
        .unwrap();
    assert!(!m.ledger.exists(&m.collection));
}

#[test]
fn test_listing_rent_returns_to_payer() {
    let mut m = TestMarket::new();
    let before = m.ledger.lamports(&m.admin);
    let (listing, nft_mint) = m.list_nft();
    let deposits = rent_for(NftBucket::LEN) + rent_for(TOKEN_ACCOUNT_LEN);
    assert_eq!(m.ledger.lamports(&m.admin), before - deposits);
    assert_eq!(m.ledger.lamports(&listing), rent_for(NftBucket::LEN));
    assert!(m.ledger.token_account_exists(&m.collection, &nft_mint));

    let buyer = m.buyer(100);
    m.purchase(&buyer, &listing).unwrap();
    assert_eq!(m.ledger.lamports(&m.admin), before);
    assert_eq!(m.ledger.lamports(&listing), 0);
    assert!(!m.ledger.token_account_exists(&m.collection, &nft_mint));
}

#[test]
fn test_buyer_pays_for_new_token_accounts() {
    let mut m = TestMarket::new();
    let (first, _) = m.list_nft();
    let (second, _) = m.list_nft();
    let buyer = m.buyer(200);
    let token_account = rent_for(TOKEN_ACCOUNT_LEN);

    m.purchase(&buyer, &first).unwrap();
    assert_eq!(m.ledger.lamports(&buyer), SOL - 2 * token_account);

    m.purchase(&buyer, &second).unwrap();
    assert_eq!(m.ledger.lamports(&buyer), SOL - 3 * token_account);
    assert_eq!(m.ledger.token_balance(&m.market, &m.mint_x), 200);
}

#[test]
fn test_escrow_closes_once_empty() {
    let mut m = TestMarket::new();
    let nft_mint = Pubkey::new_unique();
    let (collection, price_model) = (m.collection, m.price_model);
    let first = m.list_mint(&collection, &price_model, &nft_mint);
    let second = m.list_mint(&collection, &price_model, &nft_mint);
    assert_eq!(m.ledger.token_balance(&m.collection, &nft_mint), 2);

    let before = m.ledger.lamports(&m.admin);
    m.withdraw(&first).unwrap();
    assert!(m.ledger.token_account_exists(&m.collection, &nft_mint));
    assert_eq!(m.ledger.lamports(&m.admin), before + rent_for(NftBucket::LEN));

    m.withdraw(&second).unwrap();
    assert!(!m.ledger.token_account_exists(&m.collection, &nft_mint));
    assert_eq!(
        m.ledger.lamports(&m.admin),
        before + 2 * rent_for(NftBucket::LEN) + rent_for(TOKEN_ACCOUNT_LEN)
    );
    assert_eq!(m.ledger.token_balance(&m.admin, &nft_mint), 2);
}

#[test]
fn test_listing_is_bound_to_its_collection() {
    let mut m = TestMarket::new();
    let other = m
        .ledger
        .init_collection(&m.market, &m.admin, "Collection B".to_string())
        .unwrap();
    let nft_mint = Pubkey::new_unique();
    let (collection, price_model) = (m.collection, m.price_model);
    let listed_here = m.list_mint(&collection, &price_model, &nft_mint);
    let listed_there = m.list_mint(&other, &price_model, &nft_mint);
    assert_eq!(m.ledger.nft_bucket(&listed_there).unwrap().collection, other);

    let buyer = m.buyer(100);
    let snapshot = m.ledger.clone();
    let err = m.purchase(&buyer, &listed_there).unwrap_err();
    assert_eq!(err, ErrorCode::InvalidListItem.into());
    let err = m.withdraw(&listed_there).unwrap_err();
    assert_eq!(err, ErrorCode::InvalidListItem.into());
    assert_eq!(m.ledger, snapshot);

    m.ledger
        .purchase_nft(&m.market, &other, &buyer, &listed_there, &m.mint_x, &m.admin)
        .unwrap();
    m.withdraw(&listed_here).unwrap();
    assert!(m.listings().is_empty());
    assert!(m.ledger.collection_listings(&other).unwrap().is_empty());
    m.ledger
        .close_collection(&m.market, &m.collection, &m.admin, &m.admin)
        .unwrap();
    m.ledger
        .close_collection(&m.market, &other, &m.admin, &m.admin)
        .unwrap();
}

#[test]
fn test_listings_are_newest_first() {
    let mut m = TestMarket::new();
    let (a, _) = m.list_nft();
    let (b, _) = m.list_nft();
    let (c, _) = m.list_nft();
    assert_eq!(m.listings(), vec![c, b, a]);
    assert_eq!(m.listings_reversed(), vec![a, b, c]);

    let head = m.ledger.collection(&m.collection).unwrap().list_head;
    let tail = m.ledger.collection(&m.collection).unwrap().list_tail;
    assert_eq!(m.ledger.nft_bucket(&c).unwrap().prev_list_item, head);
    assert_eq!(m.ledger.nft_bucket(&a).unwrap().next_list_item, tail);
}

#[test]
fn test_withdraw_from_middle() {
    let mut m = TestMarket::new();
    let (a, _) = m.list_nft();
    let (b, nft_b) = m.list_nft();
    let (c, _) = m.list_nft();

    m.withdraw(&b).unwrap();
    assert_eq!(m.listings(), vec![c, a]);
    assert_eq!(m.listings_reversed(), vec![a, c]);
    assert_eq!(m.ledger.token_balance(&m.admin, &nft_b), 1);
    assert_eq!(m.ledger.token_balance(&m.collection, &nft_b), 0);
    assert_eq!(m.ledger.nft_bucket(&c).unwrap().next_list_item, a);
    assert_eq!(m.ledger.nft_bucket(&a).unwrap().prev_list_item, c);
}

#[test]
fn test_list_stays_consistent_over_mixed_operations() {
    let mut m = TestMarket::new();
    let mut expected: Vec<Pubkey> = Vec::new();
    let mut seed: u64 = 0x2545_f491_4f6c_dd1d;

    for _ in 0..60 {
        seed = seed
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        let choice = (seed >> 33) % 3;
        if expected.is_empty() || choice == 0 {
            let (listing, _) = m.list_nft();
            expected.insert(0, listing);
        } else {
            let position = ((seed >> 40) as usize) % expected.len();
            let listing = expected.remove(position);
            if choice == 1 {
                m.withdraw(&listing).unwrap();
            } else {
                let buyer = m.buyer(100);
                m.purchase(&buyer, &listing).unwrap();
            }
        }

        assert_eq!(m.listings(), expected);
        let mut reversed = expected.clone();
        reversed.reverse();
        assert_eq!(m.listings_reversed(), reversed);
    }
}

#[test]
fn test_whitelist_is_bounded() {
    let mut ledger = Ledger::default();
    let admin = Pubkey::new_unique();
    ledger.airdrop(&admin, SOL).unwrap();
    ledger.init_global_state(&admin).unwrap();

    let others: Vec<Pubkey> = (0..MAX_ADMINS - 1).map(|_| Pubkey::new_unique()).collect();
    let market = ledger
        .init_market(&admin, others, "Full".to_string())
        .unwrap();
    assert_eq!(ledger.market(&market).unwrap().whitelist.len(), MAX_ADMINS);
    assert_eq!(ledger.market(&market).unwrap().whitelist[0], admin);

    let snapshot = ledger.clone();
    let err = ledger
        .add_admin(&market, &admin, &Pubkey::new_unique())
        .unwrap_err();
    assert_eq!(err, ErrorCode::AdminOutOfBounds.into());
    assert_eq!(ledger, snapshot);

    let too_many: Vec<Pubkey> = (0..MAX_ADMINS).map(|_| Pubkey::new_unique()).collect();
    let err = ledger
        .init_market(&admin, too_many, "Over".to_string())
        .unwrap_err();
    assert_eq!(err, ErrorCode::AdminOutOfBounds.into());
    assert_eq!(ledger, snapshot);
}

#[test]
fn test_admin_governance() {
    let mut m = TestMarket::new();
    let other = Pubkey::new_unique();
    m.ledger.airdrop(&other, SOL).unwrap();

    let err = m.ledger.remove_admin(&m.market, &m.admin, &m.admin).unwrap_err();
    assert_eq!(err, ErrorCode::CannotRemoveSelf.into());
    let err = m.ledger.remove_admin(&m.market, &m.admin, &other).unwrap_err();
    assert_eq!(err, ErrorCode::AdminNotFound.into());
    let err = m.ledger.add_admin(&m.market, &other, &other).unwrap_err();
    assert_eq!(err, ErrorCode::Unauthorized.into());

    m.ledger.add_admin(&m.market, &m.admin, &other).unwrap();
    m.ledger
        .init_collection(&m.market, &other, "Collection B".to_string())
        .unwrap();

    m.ledger.remove_admin(&m.market, &other, &m.admin).unwrap();
    assert_eq!(m.ledger.market(&m.market).unwrap().whitelist, vec![other]);
    let err = m
        .ledger
        .init_collection(&m.market, &m.admin, "Collection C".to_string())
        .unwrap_err();
    assert_eq!(err, ErrorCode::Unauthorized.into());
}

#[test]
fn test_admin_operations_reject_outsiders() {
    let mut m = TestMarket::new();
    let (listing, _) = m.list_nft();
    let outsider = Pubkey::new_unique();
    m.ledger.airdrop(&outsider, SOL).unwrap();
    let nft_mint = Pubkey::new_unique();
    m.ledger.mint_to(&outsider, &nft_mint, 1).unwrap();
    let snapshot = m.ledger.clone();

    let results = vec![
        m.ledger
            .init_collection(&m.market, &outsider, "Nope".to_string())
            .map(|_| ()),
        m.ledger
            .init_price_model(&m.market, &outsider, vec![])
            .map(|_| ()),
        m.ledger.add_nft(
            &m.market,
            &m.collection,
            &m.price_model,
            &outsider,
            &nft_mint,
            &Pubkey::new_unique(),
        ),
        m.ledger
            .withdraw_nft(&m.market, &m.collection, &outsider, &listing, &m.admin),
        m.ledger
            .withdraw_liquidity(&m.market, &outsider, &m.mint_x, 0),
        m.ledger
            .close_collection(&m.market, &m.collection, &outsider, &outsider),
    ];
    for result in results {
        assert_eq!(result.unwrap_err(), ErrorCode::Unauthorized.into());
    }
    assert_eq!(m.ledger, snapshot);
}

#[test]
fn test_purchase_failures_leave_ledger_untouched() {
    let mut m = TestMarket::new();
    let (listing, _) = m.list_nft();
    let poor = m.buyer(99);
    let snapshot = m.ledger.clone();

    let err = m.purchase(&poor, &listing).unwrap_err();
    assert_eq!(err, ErrorCode::Overflow.into());
    assert_eq!(m.ledger, snapshot);

    let other_mint = Pubkey::new_unique();
    let err = m
        .ledger
        .purchase_nft(&m.market, &m.collection, &poor, &listing, &other_mint, &m.admin)
        .unwrap_err();
    assert_eq!(err, ErrorCode::InvalidPurchaseMint.into());
    assert_eq!(m.ledger, snapshot);

    let err = m
        .ledger
        .purchase_nft(&m.market, &m.collection, &poor, &listing, &m.mint_x, &poor)
        .unwrap_err();
    assert_eq!(err, ErrorCode::RentRefundMismatch.into());
    assert_eq!(m.ledger, snapshot);
}

#[test]
fn test_listing_sells_once() {
    let mut m = TestMarket::new();
    let (listing, nft_mint) = m.list_nft();
    let first = m.buyer(100);
    let second = m.buyer(100);

    m.purchase(&first, &listing).unwrap();
    let snapshot = m.ledger.clone();
    let err = m.purchase(&second, &listing).unwrap_err();
    assert_eq!(err, anchor_lang::error::ErrorCode::AccountNotInitialized.into());
    assert_eq!(m.ledger, snapshot);
    assert_eq!(m.ledger.token_balance(&first, &nft_mint), 1);
    assert_eq!(m.ledger.token_balance(&second, &m.mint_x), 100);
}

#[test]
fn test_sentinels_cannot_be_sold_or_withdrawn() {
    let mut m = TestMarket::new();
    m.list_nft();
    let head = m.ledger.collection(&m.collection).unwrap().list_head;
    let tail = m.ledger.collection(&m.collection).unwrap().list_tail;
    let buyer = m.buyer(100);

    let err = m.purchase(&buyer, &head).unwrap_err();
    assert_eq!(err, ErrorCode::InvalidListItem.into());
    let err = m.withdraw(&tail).unwrap_err();
    assert_eq!(err, ErrorCode::InvalidListItem.into());
}

#[test]
fn test_withdraw_requires_listing_payer_refund() {
    let mut m = TestMarket::new();
    let (listing, _) = m.list_nft();
    let snapshot = m.ledger.clone();
    let err = m
        .ledger
        .withdraw_nft(&m.market, &m.collection, &m.admin, &listing, &Pubkey::new_unique())
        .unwrap_err();
    assert_eq!(err, ErrorCode::RentRefundMismatch.into());
    assert_eq!(m.ledger, snapshot);
}

#[test]
fn test_add_nft_requires_single_token() {
    let mut m = TestMarket::new();
    let nft_mint = Pubkey::new_unique();
    let err = m
        .ledger
        .add_nft(
            &m.market,
            &m.collection,
            &m.price_model,
            &m.admin,
            &nft_mint,
            &Pubkey::new_unique(),
        )
        .unwrap_err();
    assert_eq!(err, ErrorCode::InvalidNftAmount.into());

    let (listing, _) = m.list_nft();
    let reused = Pubkey::new_unique();
    m.ledger.mint_to(&m.admin, &reused, 1).unwrap();
    let snapshot = m.ledger.clone();
    assert!(m
        .ledger
        .add_nft(&m.market, &m.collection, &m.price_model, &m.admin, &reused, &listing)
        .is_err());
    assert_eq!(m.ledger, snapshot);
}

#[test]
fn test_native_mint_purchase() {
    let mut m = TestMarket::new();
    let sol_price = SalePrice::from_whole_units(NATIVE_MINT, 9, 1).unwrap();
    let price = sol_price.amount;
    let native_model = m
        .ledger
        .init_price_model(
            &m.market,
            &m.admin,
            vec![sol_price, SalePrice { mint: m.mint_x, amount: 100 }],
        )
        .unwrap();
    let (listing, nft_mint) = m.list_nft_with(&native_model);

    let short = Pubkey::new_unique();
    m.ledger.airdrop(&short, price).unwrap();
    let snapshot = m.ledger.clone();
    let err = m
        .ledger
        .purchase_nft(&m.market, &m.collection, &short, &listing, &NATIVE_MINT, &m.admin)
        .unwrap_err();
    assert_eq!(err, ErrorCode::Overflow.into());
    assert_eq!(m.ledger, snapshot);

    let buyer = Pubkey::new_unique();
    m.ledger.airdrop(&buyer, 2 * SOL).unwrap();
    m.ledger
        .purchase_nft(&m.market, &m.collection, &buyer, &listing, &NATIVE_MINT, &m.admin)
        .unwrap();
    assert_eq!(price, SOL);
    assert_eq!(
        m.ledger.lamports(&buyer),
        2 * SOL - price - 2 * rent_for(TOKEN_ACCOUNT_LEN)
    );
    assert_eq!(m.ledger.token_balance(&m.market, &NATIVE_MINT), price);
    assert_eq!(m.ledger.token_balance(&buyer, &nft_mint), 1);
}

#[test]
fn test_withdraw_liquidity() {
    let mut m = TestMarket::new();
    let (listing, _) = m.list_nft();
    let buyer = m.buyer(100);
    m.purchase(&buyer, &listing).unwrap();

    m.ledger
        .withdraw_liquidity(&m.market, &m.admin, &m.mint_x, 60)
        .unwrap();
    assert_eq!(m.ledger.token_balance(&m.admin, &m.mint_x), 60);
    assert_eq!(m.ledger.token_balance(&m.market, &m.mint_x), 40);

    let snapshot = m.ledger.clone();
    let err = m
        .ledger
        .withdraw_liquidity(&m.market, &m.admin, &m.mint_x, 41)
        .unwrap_err();
    assert_eq!(err, ErrorCode::Overflow.into());
    assert_eq!(m.ledger, snapshot);
}

#[test]
fn test_close_collection() {
    let mut m = TestMarket::new();
    let (listing, _) = m.list_nft();
    let collection = m.ledger.collection(&m.collection).unwrap().clone();
    let refund = Pubkey::new_unique();

    let err = m
        .ledger
        .close_collection(&m.market, &m.collection, &m.admin, &refund)
        .unwrap_err();
    assert_eq!(err, ErrorCode::CollectionNonEmpty.into());

    m.withdraw(&listing).unwrap();
    m.ledger
        .close_collection(&m.market, &m.collection, &m.admin, &refund)
        .unwrap();
    assert!(!m.ledger.exists(&m.collection));
    assert!(!m.ledger.exists(&collection.list_head));
    assert!(!m.ledger.exists(&collection.list_tail));
    assert_eq!(
        m.ledger.lamports(&refund),
        rent_for(Collection::LEN) + 2 * rent_for(NftBucket::LEN)
    );

    let next = m
        .ledger
        .init_collection(&m.market, &m.admin, "Collection B".to_string())
        .unwrap();
    assert_ne!(next, m.collection);
    assert_eq!(m.ledger.collection(&next).unwrap().index, 1);
    assert_eq!(m.ledger.market(&m.market).unwrap().num_collections, 2);
}

#[test]
fn test_markets_are_indexed_in_order() {
    let mut m = TestMarket::new();
    let (global_state, _) = global_state_address(m.ledger.program_id());
    assert!(m.ledger.init_global_state(&m.admin).is_err());

    let second = m
        .ledger
        .init_market(&m.admin, vec![], "Second".to_string())
        .unwrap();
    let (expected, _) = market_address(m.ledger.program_id(), &global_state, 1);
    assert_eq!(second, expected);
    assert_eq!(m.ledger.market(&second).unwrap().index, 1);
    assert_eq!(m.ledger.global_state(&global_state).unwrap().num_markets, 2);
}

#[test]
fn test_accounts_must_belong_to_market() {
    let mut m = TestMarket::new();
    let other_market = m
        .ledger
        .init_market(&m.admin, vec![], "Other".to_string())
        .unwrap();
    let other_model = m
        .ledger
        .init_price_model(&other_market, &m.admin, vec![SalePrice { mint: m.mint_x, amount: 1 }])
        .unwrap();
    let other_collection = m
        .ledger
        .init_collection(&other_market, &m.admin, "Other".to_string())
        .unwrap();

    let nft_mint = Pubkey::new_unique();
    m.ledger.mint_to(&m.admin, &nft_mint, 1).unwrap();
    let err = m
        .ledger
        .add_nft(
            &m.market,
            &m.collection,
            &other_model,
            &m.admin,
            &nft_mint,
            &Pubkey::new_unique(),
        )
        .unwrap_err();
    assert_eq!(err, anchor_lang::error::ErrorCode::ConstraintHasOne.into());

    let err = m
        .ledger
        .close_collection(&m.market, &other_collection, &m.admin, &m.admin)
        .unwrap_err();
    assert_eq!(err, anchor_lang::error::ErrorCode::ConstraintSeeds.into());
}
