use anchor_lang::prelude::*;
use crate::state::GridIndex;

/// CreateGridIndex uses the `zero` constraint because GridIndex (~56KB)
/// exceeds Solana's 10KB limit for account creation in CPI.
///
/// The client must pre-create the account with:
/// 1. SystemProgram.createAccount (with program as owner, GridIndex::SIZE bytes)
/// 2. Then call this instruction to claim it
#[derive(Accounts)]
pub struct CreateGridIndex<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    /// Pre-created by the client with owner = program ID and zeroed data
    #[account(zero)]
    pub grid_index: AccountLoader<'info, GridIndex>,
}

pub fn handler(ctx: Context<CreateGridIndex>) -> Result<()> {
    // Writes the discriminator; slots and bucket masks are already zero.
    // Dimensions are set by initialize_world.
    let _grid_index = ctx.accounts.grid_index.load_init()?;
    msg!("GridIndex created at {}", ctx.accounts.grid_index.key());
    Ok(())
}
