use anchor_lang::prelude::*;
use crate::state::World;
use crate::errors::TerraError;

#[derive(Accounts)]
pub struct UpdateWorld<'info> {
    #[account(
        constraint = authority.key() == world.authority @ TerraError::Unauthorized
    )]
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [World::SEED],
        bump = world.bump
    )]
    pub world: Account<'info, World>,
}

/// Bounds, id allocation and area counters are not updatable.
#[allow(clippy::too_many_arguments)]
pub fn handler(
    ctx: Context<UpdateWorld>,
    price_per_unit: Option<u64>,
    treasury: Option<Pubkey>,
    citizenship_price: Option<u64>,
    senior_citizenship_price: Option<u64>,
    visa_price_per_hour: Option<u64>,
    senior_visa_price_per_hour: Option<u64>,
    new_authority: Option<Pubkey>,
) -> Result<()> {
    let world = &mut ctx.accounts.world;

    if let Some(price) = price_per_unit {
        world.price_per_unit = price;
        msg!("Updated price_per_unit to {}", price);
    }

    if let Some(treasury) = treasury {
        world.treasury = treasury;
        msg!("Updated treasury to {}", treasury);
    }

    if let Some(price) = citizenship_price {
        world.citizenship_price = price;
        msg!("Updated citizenship_price to {}", price);
    }

    if let Some(price) = senior_citizenship_price {
        world.senior_citizenship_price = price;
        msg!("Updated senior_citizenship_price to {}", price);
    }

    if let Some(price) = visa_price_per_hour {
        world.visa_price_per_hour = price;
        msg!("Updated visa_price_per_hour to {}", price);
    }

    if let Some(price) = senior_visa_price_per_hour {
        world.senior_visa_price_per_hour = price;
        msg!("Updated senior_visa_price_per_hour to {}", price);
    }

    if let Some(authority) = new_authority {
        world.authority = authority;
        msg!("Updated authority to {}", authority);
    }

    Ok(())
}
