use anchor_lang::prelude::*;
use anchor_spl::token_interface::Mint;
use crate::errors::TerraError;
use crate::events::WorldInitialized;
use crate::state::{GridIndex, World};

#[derive(Accounts)]
pub struct InitializeWorld<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    /// Payment mint - supports both Token and Token-2022
    pub payment_mint: InterfaceAccount<'info, Mint>,

    /// CHECK: Any wallet; land sales and pass fees are paid to its token accounts
    pub treasury: UncheckedAccount<'info>,

    #[account(
        init,
        payer = authority,
        space = 8 + World::INIT_SPACE,
        seeds = [World::SEED],
        bump
    )]
    pub world: Account<'info, World>,

    /// GridIndex must be created first via create_grid_index.
    /// Not a PDA - uses keypair account due to 10KB CPI limit for large accounts.
    #[account(mut)]
    pub grid_index: AccountLoader<'info, GridIndex>,

    pub system_program: Program<'info, System>,
}

#[allow(clippy::too_many_arguments)]
pub fn handler(
    ctx: Context<InitializeWorld>,
    width: u32,
    height: u32,
    price_per_unit: u64,
    citizenship_price: u64,
    senior_citizenship_price: u64,
    visa_price_per_hour: u64,
    senior_visa_price_per_hour: u64,
) -> Result<()> {
    require!(width > 0 && height > 0, TerraError::InvalidWorld);

    {
        let mut grid_index = ctx.accounts.grid_index.load_mut()?;
        require!(grid_index.is_empty(), TerraError::InvalidWorld);
        grid_index.init(width, height);
    }

    let world = &mut ctx.accounts.world;
    world.authority = ctx.accounts.authority.key();
    world.payment_mint = ctx.accounts.payment_mint.key();
    world.treasury = ctx.accounts.treasury.key();
    world.grid_index = ctx.accounts.grid_index.key();
    world.width = width;
    world.height = height;
    world.price_per_unit = price_per_unit;
    world.next_parcel_id = 1; // 0 means no parcel
    world.claimed_area = 0;
    world.live_parcels = 0;
    world.citizenship_price = citizenship_price;
    world.senior_citizenship_price = senior_citizenship_price;
    world.visa_price_per_hour = visa_price_per_hour;
    world.senior_visa_price_per_hour = senior_visa_price_per_hour;
    world.bump = ctx.bumps.world;

    emit!(WorldInitialized {
        world: world.key(),
        authority: world.authority,
        grid_index: world.grid_index,
        width,
        height,
        price_per_unit,
    });

    msg!(
        "World initialized: {}x{} ({} units) at {} per unit",
        width,
        height,
        world.total_area(),
        price_per_unit
    );
    Ok(())
}
