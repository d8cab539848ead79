use anchor_lang::prelude::*;
use crate::errors::TerraError;
use super::Rect;

/// Singleton configuration for the nation's land. Bounds never change after
/// `initialize_world`; prices and the treasury are authority-updatable.
#[account]
#[derive(InitSpace, Debug, PartialEq)]
pub struct World {
    pub authority: Pubkey,
    pub payment_mint: Pubkey,
    /// Wallet that receives primary land sales and pass fees
    pub treasury: Pubkey,
    /// Address of the GridIndex account (not a PDA due to 10KB CPI limit)
    pub grid_index: Pubkey,
    pub width: u32,
    pub height: u32,
    pub price_per_unit: u64,
    /// Next id to hand out; 0 is reserved for "no parcel"
    pub next_parcel_id: u64,
    /// Sum of the areas of all live parcels
    pub claimed_area: u64,
    pub live_parcels: u32,
    pub citizenship_price: u64,
    pub senior_citizenship_price: u64,
    pub visa_price_per_hour: u64,
    pub senior_visa_price_per_hour: u64,
    pub bump: u8,
}

impl World {
    pub const SEED: &'static [u8] = b"world";

    pub fn total_area(&self) -> u64 {
        (self.width as u64) * (self.height as u64)
    }

    pub fn contains(&self, rect: &Rect) -> bool {
        rect.fits_within(self.width, self.height)
    }
}

/// Staged copy of the world's counters. Operations compute the new values
/// while validating and write them back only once everything has succeeded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WorldTally {
    pub next_parcel_id: u64,
    pub claimed_area: u64,
    pub live_parcels: u32,
}

impl WorldTally {
    pub fn of(world: &World) -> Self {
        Self {
            next_parcel_id: world.next_parcel_id,
            claimed_area: world.claimed_area,
            live_parcels: world.live_parcels,
        }
    }

    /// Hands out the next parcel id.
    pub fn allocate_id(&mut self) -> Result<u64> {
        let id = self.next_parcel_id;
        self.next_parcel_id = id.checked_add(1).ok_or(TerraError::Overflow)?;
        Ok(id)
    }

    pub fn add_parcel(&mut self, area: u64) -> Result<()> {
        self.claimed_area = self
            .claimed_area
            .checked_add(area)
            .ok_or(TerraError::Overflow)?;
        self.live_parcels = self
            .live_parcels
            .checked_add(1)
            .ok_or(TerraError::Overflow)?;
        Ok(())
    }

    pub fn remove_parcel(&mut self, area: u64) -> Result<()> {
        self.claimed_area = self
            .claimed_area
            .checked_sub(area)
            .ok_or(TerraError::Overflow)?;
        self.live_parcels = self
            .live_parcels
            .checked_sub(1)
            .ok_or(TerraError::Overflow)?;
        Ok(())
    }

    pub fn apply(self, world: &mut World) {
        world.next_parcel_id = self.next_parcel_id;
        world.claimed_area = self.claimed_area;
        world.live_parcels = self.live_parcels;
    }
}
