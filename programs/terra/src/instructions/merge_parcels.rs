use anchor_lang::prelude::*;
use crate::errors::TerraError;
use crate::events::ParcelsMerged;
use crate::registry::Registry;
use crate::state::{GridIndex, Parcel, World};
use crate::store::{AccountStore, ParcelStore};

/// Both source parcels are closed to the owner; the union lives on under the
/// next parcel id.
#[derive(Accounts)]
#[instruction(first_id: u64, second_id: u64)]
pub struct MergeParcels<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(
        mut,
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
        seeds = [Parcel::SEED, &first_id.to_le_bytes()],
        bump = first.bump,
        close = owner,
    )]
    pub first: Account<'info, Parcel>,

    #[account(
        mut,
        seeds = [Parcel::SEED, &second_id.to_le_bytes()],
        bump = second.bump,
        close = owner,
    )]
    pub second: Account<'info, Parcel>,

    #[account(
        init,
        payer = owner,
        space = 8 + Parcel::INIT_SPACE,
        seeds = [Parcel::SEED, &world.next_parcel_id.to_le_bytes()],
        bump
    )]
    pub merged: Account<'info, Parcel>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<MergeParcels>, first_id: u64, second_id: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let accounts = &mut *ctx.accounts;
    let owner = accounts.owner.key();
    let reserved_id = accounts.world.next_parcel_id;

    let mut store = AccountStore::new(vec![&mut *accounts.first, &mut *accounts.second])
        .with_fresh(reserved_id, ctx.bumps.merged, &mut accounts.merged);
    let mut grid_index = accounts.grid_index.load_mut()?;
    let mut registry = Registry::new(&mut accounts.world, &mut grid_index, &mut store, now);

    let merged_id = registry.merge(first_id, second_id, owner)?;
    let rect = store.get(merged_id)?.rect;

    emit!(ParcelsMerged {
        first_id,
        second_id,
        merged_id,
        rect,
        owner,
    });
    Ok(())
}
