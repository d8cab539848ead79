use anchor_lang::prelude::*;
use crate::state::{ListingKind, PassKind, Rect, Tier};

#[event]
pub struct WorldInitialized {
    pub world: Pubkey,
    pub authority: Pubkey,
    pub grid_index: Pubkey,
    pub width: u32,
    pub height: u32,
    pub price_per_unit: u64,
}

#[event]
pub struct ParcelPurchased {
    pub parcel_id: u64,
    pub buyer: Pubkey,
    pub rect: Rect,
    pub amount: u64,
}

#[event]
pub struct ParcelTransferred {
    pub parcel_id: u64,
    pub from: Pubkey,
    pub to: Pubkey,
}

#[event]
pub struct ParcelListed {
    pub parcel_id: u64,
    pub owner: Pubkey,
    pub kind: ListingKind,
    pub unit_price: u64,
}

#[event]
pub struct ListingCancelled {
    pub parcel_id: u64,
    pub owner: Pubkey,
    pub kind: ListingKind,
}

#[event]
pub struct ParcelSold {
    pub parcel_id: u64,
    pub seller: Pubkey,
    pub buyer: Pubkey,
    pub amount: u64,
}

#[event]
pub struct ParcelRented {
    pub parcel_id: u64,
    pub owner: Pubkey,
    pub renter: Pubkey,
    pub expires_at: i64,
    pub amount: u64,
}

#[event]
pub struct RentalCleared {
    pub parcel_id: u64,
    pub renter: Pubkey,
    pub expired_at: i64,
}

#[event]
pub struct ParcelSplit {
    pub parent_id: u64,
    pub parent_rect: Rect,
    pub child_id: u64,
    pub child_rect: Rect,
    pub owner: Pubkey,
}

#[event]
pub struct ParcelsMerged {
    pub first_id: u64,
    pub second_id: u64,
    pub merged_id: u64,
    pub rect: Rect,
    pub owner: Pubkey,
}

#[event]
pub struct PassIssued {
    pub holder: Pubkey,
    pub kind: PassKind,
    pub tier: Tier,
    pub expires_at: i64,
    pub amount: u64,
}

#[event]
pub struct PassClosed {
    pub holder: Pubkey,
    pub kind: PassKind,
}
