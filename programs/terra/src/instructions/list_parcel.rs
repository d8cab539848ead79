use anchor_lang::prelude::*;
use crate::errors::TerraError;
use crate::events::{ListingCancelled, ParcelListed};
use crate::registry::Registry;
use crate::state::{GridIndex, ListingKind, Parcel, World};
use crate::store::AccountStore;

/// Shared by list_for_sale, list_for_rent and delist.
#[derive(Accounts)]
#[instruction(parcel_id: u64)]
pub struct ListParcel<'info> {
    pub owner: Signer<'info>,

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

pub fn sale_handler(ctx: Context<ListParcel>, parcel_id: u64, unit_price: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let accounts = &mut *ctx.accounts;
    let owner = accounts.owner.key();

    let mut store = AccountStore::new(vec![&mut *accounts.parcel]);
    let mut grid_index = accounts.grid_index.load_mut()?;
    let mut registry = Registry::new(&mut accounts.world, &mut grid_index, &mut store, now);

    registry.list_for_sale(parcel_id, owner, unit_price)?;

    emit!(ParcelListed {
        parcel_id,
        owner,
        kind: ListingKind::Sale,
        unit_price,
    });
    msg!("Parcel {} listed for sale at {} per unit", parcel_id, unit_price);
    Ok(())
}

pub fn rent_handler(ctx: Context<ListParcel>, parcel_id: u64, unit_price: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let accounts = &mut *ctx.accounts;
    let owner = accounts.owner.key();

    let mut store = AccountStore::new(vec![&mut *accounts.parcel]);
    let mut grid_index = accounts.grid_index.load_mut()?;
    let mut registry = Registry::new(&mut accounts.world, &mut grid_index, &mut store, now);

    registry.list_for_rent(parcel_id, owner, unit_price)?;

    emit!(ParcelListed {
        parcel_id,
        owner,
        kind: ListingKind::Rent,
        unit_price,
    });
    msg!("Parcel {} listed for rent at {} per unit per second", parcel_id, unit_price);
    Ok(())
}

pub fn delist_handler(ctx: Context<ListParcel>, parcel_id: u64, kind: ListingKind) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let accounts = &mut *ctx.accounts;
    let owner = accounts.owner.key();

    let mut store = AccountStore::new(vec![&mut *accounts.parcel]);
    let mut grid_index = accounts.grid_index.load_mut()?;
    let mut registry = Registry::new(&mut accounts.world, &mut grid_index, &mut store, now);

    registry.delist(parcel_id, owner, kind)?;

    emit!(ListingCancelled { parcel_id, owner, kind });
    msg!("Parcel {} delisted ({:?})", parcel_id, kind);
    Ok(())
}
