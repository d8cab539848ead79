use anchor_lang::prelude::*;
use crate::errors::TerraError;
use crate::events::RentalCleared;
use crate::registry::Registry;
use crate::state::{GridIndex, Parcel, World};
use crate::store::AccountStore;

/// Permissionless sweep of a rental that has run out.
#[derive(Accounts)]
#[instruction(parcel_id: u64)]
pub struct ClearExpiredRental<'info> {
    pub caller: Signer<'info>,

    #[account(
        seeds = [World::SEED],
        bump = world.bump
    )]
    pub world: Account<'info, World>,

    #[account(
        mut,
        constraint = grid_index.key() == world.grid_index @ TerraError::AccountMismatch
    )]
    pub grid_index: AccountLoader<'info, GridIndex>,

    #[account(
        mut,
        seeds = [Parcel::SEED, &parcel_id.to_le_bytes()],
        bump = parcel.bump
    )]
    pub parcel: Account<'info, Parcel>,
}

pub fn handler(ctx: Context<ClearExpiredRental>, parcel_id: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let accounts = &mut *ctx.accounts;

    let mut store = AccountStore::new(vec![&mut *accounts.parcel]);
    let mut grid_index = accounts.grid_index.load_mut()?;
    let mut registry = Registry::new(&mut accounts.world, &mut grid_index, &mut store, now);

    let rental = registry.clear_expired_rental(parcel_id)?;

    emit!(RentalCleared {
        parcel_id,
        renter: rental.renter,
        expired_at: rental.expires_at,
    });
    msg!("Rental of parcel {} by {} cleared", parcel_id, rental.renter);
    Ok(())
}
