use anchor_lang::prelude::*;
use crate::errors::TerraError;
use crate::events::ParcelTransferred;
use crate::registry::Registry;
use crate::state::{GridIndex, Parcel, World};
use crate::store::AccountStore;

#[derive(Accounts)]
#[instruction(parcel_id: u64)]
pub struct TransferParcel<'info> {
    pub owner: Signer<'info>,

    #[account(
        seeds = [World::SEED],
        bump = world.bump
    )]
    pub world: Account<'info, World>,

    /// Writable so land mutations serialize on the index
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

pub fn handler(ctx: Context<TransferParcel>, parcel_id: u64, new_owner: Pubkey) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let accounts = &mut *ctx.accounts;
    let owner = accounts.owner.key();

    let mut store = AccountStore::new(vec![&mut *accounts.parcel]);
    let mut grid_index = accounts.grid_index.load_mut()?;
    let mut registry = Registry::new(&mut accounts.world, &mut grid_index, &mut store, now);

    registry.transfer(parcel_id, owner, new_owner)?;

    emit!(ParcelTransferred {
        parcel_id,
        from: owner,
        to: new_owner,
    });
    Ok(())
}
