use anchor_lang::prelude::*;
use crate::errors::TerraError;
use crate::events::PassClosed;
use crate::state::{Pass, PassKind};

#[derive(Accounts)]
#[instruction(kind: PassKind)]
pub struct CloseExpiredPass<'info> {
    #[account(mut)]
    pub holder: Signer<'info>,

    #[account(
        mut,
        seeds = [Pass::SEED, kind.seed(), holder.key().as_ref()],
        bump = pass.bump,
        has_one = holder @ TerraError::Unauthorized,
        close = holder,
    )]
    pub pass: Account<'info, Pass>,
}

pub fn handler(ctx: Context<CloseExpiredPass>, kind: PassKind) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let pass = &ctx.accounts.pass;

    if pass.is_active(now) {
        msg!("Pass expires in {}s", pass.remaining_secs(now));
        return err!(TerraError::PassActive);
    }

    // Account is closed by the `close = holder` constraint
    emit!(PassClosed {
        holder: pass.holder,
        kind,
    });
    msg!("Closed expired {:?} pass of {}", kind, pass.holder);
    Ok(())
}
