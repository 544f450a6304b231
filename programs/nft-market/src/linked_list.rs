//! Intrusive doubly-linked list of `NftBucket` nodes anchored by two sentinels.
//!
//! Nodes live in separate accounts and point at their neighbors by address, so
//! every splice takes the nodes it rewrites together with their addresses and
//! checks the links it relies on before touching anything.

use anchor_lang::prelude::*;
use crate::error::ErrorCode;
use crate::state::NftBucket;

pub struct ListNode<'a> {
    pub key: Pubkey,
    pub item: &'a mut NftBucket,
}

impl<'a> ListNode<'a> {
    pub fn new(key: Pubkey, item: &'a mut NftBucket) -> Self {
        Self { key, item }
    }
}

/// Splices `new` between the head sentinel and its current successor.
pub fn insert_after_head(head: ListNode, next: ListNode, new: ListNode) -> Result<()> {
    require_keys_eq!(head.item.next_list_item, next.key, ErrorCode::InvalidListItem);
    require_keys_eq!(next.item.prev_list_item, head.key, ErrorCode::InvalidListItem);

    new.item.prev_list_item = head.key;
    new.item.next_list_item = next.key;
    next.item.prev_list_item = new.key;
    head.item.next_list_item = new.key;
    Ok(())
}

/// Detaches the node at `key` by linking its neighbors to each other. The node
/// itself is left untouched; its account is closed by the caller.
pub fn unlink(key: Pubkey, item: &NftBucket, prev: ListNode, next: ListNode) -> Result<()> {
    require_keys_eq!(item.prev_list_item, prev.key, ErrorCode::InvalidListItem);
    require_keys_eq!(item.next_list_item, next.key, ErrorCode::InvalidListItem);
    require_keys_eq!(prev.item.next_list_item, key, ErrorCode::InvalidListItem);
    require_keys_eq!(next.item.prev_list_item, key, ErrorCode::InvalidListItem);

    prev.item.next_list_item = next.key;
    next.item.prev_list_item = prev.key;
    Ok(())
}

pub fn is_empty(list_head: &NftBucket, list_tail: &Pubkey) -> bool {
    list_head.next_list_item == *list_tail
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// Walks the listings between two sentinels, yielding each node once.
/// A missing node or a walk longer than `budget` means the links are broken.
pub struct ListIter<'a, F>
where
    F: Fn(&Pubkey) -> Option<&'a NftBucket>,
{
    lookup: F,
    cursor: Option<Pubkey>,
    end: Pubkey,
    direction: Direction,
    budget: usize,
}

impl<'a, F> ListIter<'a, F>
where
    F: Fn(&Pubkey) -> Option<&'a NftBucket>,
{
    pub fn forward(list_head: &NftBucket, list_tail: Pubkey, budget: usize, lookup: F) -> Self {
        Self {
            lookup,
            cursor: Some(list_head.next_list_item),
            end: list_tail,
            direction: Direction::Forward,
            budget,
        }
    }

    pub fn backward(list_tail: &NftBucket, list_head: Pubkey, budget: usize, lookup: F) -> Self {
        Self {
            lookup,
            cursor: Some(list_tail.prev_list_item),
            end: list_head,
            direction: Direction::Backward,
            budget,
        }
    }
}

impl<'a, F> Iterator for ListIter<'a, F>
where
    F: Fn(&Pubkey) -> Option<&'a NftBucket>,
{
    type Item = Result<(Pubkey, &'a NftBucket)>;

    fn next(&mut self) -> Option<Self::Item> {
        let key = self.cursor?;
        if key == self.end {
            self.cursor = None;
            return None;
        }
        let item = match (self.lookup)(&key) {
            Some(item) if self.budget > 0 => item,
            _ => {
                self.cursor = None;
                return Some(Err(ErrorCode::InvalidListItem.into()));
            }
        };
        self.budget -= 1;
        self.cursor = Some(match self.direction {
            Direction::Forward => item.next_list_item,
            Direction::Backward => item.prev_list_item,
        });
        Some(Ok((key, item)))
    }
}
