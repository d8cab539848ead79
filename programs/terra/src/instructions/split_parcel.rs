use anchor_lang::prelude::*;
use crate::errors::TerraError;
use crate::events::ParcelSplit;
use crate::registry::Registry;
use crate::state::{GridIndex, Parcel, Rect, World};
use crate::store::{AccountStore, ParcelStore};

#[derive(Accounts)]
#[instruction(parcel_id: u64)]
pub struct SplitParcel<'info> {
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
        seeds = [Parcel::SEED, &parcel_id.to_le_bytes()],
        bump = parcel.bump
    )]
    pub parcel: Account<'info, Parcel>,

    /// Receives the carved-out rectangle under the next parcel id
    #[account(
        init,
        payer = owner,
        space = 8 + Parcel::INIT_SPACE,
        seeds = [Parcel::SEED, &world.next_parcel_id.to_le_bytes()],
        bump
    )]
    pub child: Account<'info, Parcel>,

    pub system_program: Program<'info, System>,
}

pub fn handler(
    ctx: Context<SplitParcel>,
    parcel_id: u64,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let sub_rect = Rect::new(x, y, width, height);
    let accounts = &mut *ctx.accounts;
    let owner = accounts.owner.key();
    let reserved_id = accounts.world.next_parcel_id;

    let mut store = AccountStore::new(vec![&mut *accounts.parcel])
        .with_fresh(reserved_id, ctx.bumps.child, &mut accounts.child);
    let mut grid_index = accounts.grid_index.load_mut()?;
    let mut registry = Registry::new(&mut accounts.world, &mut grid_index, &mut store, now);

    let (parent_id, child_id) = registry.split(parcel_id, owner, sub_rect)?;
    let parent_rect = store.get(parent_id)?.rect;

    emit!(ParcelSplit {
        parent_id,
        parent_rect,
        child_id,
        child_rect: sub_rect,
        owner,
    });
    Ok(())
}
