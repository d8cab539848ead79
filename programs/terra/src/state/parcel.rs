use anchor_lang::prelude::*;
use crate::errors::TerraError;
use super::{Rect, World};

#[derive(AnchorSerialize, AnchorDeserialize, InitSpace, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rental {
    pub renter: Pubkey,
    pub expires_at: i64,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListingKind {
    Sale,
    Rent,
}

#[account]
#[derive(InitSpace, Debug, PartialEq)]
pub struct Parcel {
    pub id: u64,
    pub owner: Pubkey,
    pub rect: Rect,
    /// Set while listed for sale
    pub sale_price_per_unit: Option<u64>,
    /// Set while listed for rent
    pub rent_price_per_unit: Option<u64>,
    /// Last rental; may have expired until swept or replaced
    pub rental: Option<Rental>,
    pub created_at: i64,
    pub bump: u8,
}

impl Parcel {
    pub const SEED: &'static [u8] = b"parcel";

    /// A fresh, unlisted parcel. Rejects rectangles that are empty or leave
    /// the world.
    pub fn new(id: u64, owner: Pubkey, rect: Rect, world: &World, now: i64) -> Result<Self> {
        if !world.contains(&rect) {
            msg!("Rect {} is not inside the {}x{} world", rect, world.width, world.height);
            return err!(TerraError::InvalidRectangle);
        }

        Ok(Self {
            id,
            owner,
            rect,
            sale_price_per_unit: None,
            rent_price_per_unit: None,
            rental: None,
            created_at: now,
            bump: 0,
        })
    }

    pub fn area(&self) -> u64 {
        self.rect.area()
    }

    pub fn is_for_sale(&self) -> bool {
        self.sale_price_per_unit.is_some()
    }

    pub fn is_for_rent(&self) -> bool {
        self.rent_price_per_unit.is_some()
    }

    pub fn require_owner(&self, caller: &Pubkey) -> Result<()> {
        if self.owner != *caller {
            msg!("{} is not the owner of parcel {}", caller, self.id);
            return err!(TerraError::Unauthorized);
        }
        Ok(())
    }

    /// The rental still in force at `now`. Expired rentals are ignored even
    /// before they are swept.
    pub fn active_rental(&self, now: i64) -> Option<&Rental> {
        self.rental.as_ref().filter(|rental| rental.expires_at > now)
    }

    pub fn clear_listings(&mut self) {
        self.sale_price_per_unit = None;
        self.rent_price_per_unit = None;
    }
}

/// Selects parcels for `list_parcels`. `None` fields match everything.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ParcelFilter {
    pub owner: Option<Pubkey>,
    pub for_sale: Option<bool>,
    pub for_rent: Option<bool>,
}

impl ParcelFilter {
    pub fn owned_by(owner: Pubkey) -> Self {
        Self { owner: Some(owner), ..Self::default() }
    }

    pub fn for_sale() -> Self {
        Self { for_sale: Some(true), ..Self::default() }
    }

    pub fn for_rent() -> Self {
        Self { for_rent: Some(true), ..Self::default() }
    }

    pub fn matches(&self, parcel: &Parcel) -> bool {
        self.owner.map_or(true, |owner| parcel.owner == owner)
            && self.for_sale.map_or(true, |flag| parcel.is_for_sale() == flag)
            && self.for_rent.map_or(true, |flag| parcel.is_for_rent() == flag)
    }
}
