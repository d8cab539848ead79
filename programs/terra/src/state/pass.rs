use anchor_lang::prelude::*;
use crate::errors::TerraError;
use super::World;

pub const CITIZENSHIP_TERM_SECS: i64 = 365 * 24 * 60 * 60;
pub const MAX_VISA_HOURS: u64 = 30 * 24;

#[derive(AnchorSerialize, AnchorDeserialize, InitSpace, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PassKind {
    Citizenship,
    Visa,
}

impl PassKind {
    pub fn seed(&self) -> &'static [u8] {
        match self {
            PassKind::Citizenship => b"citizenship",
            PassKind::Visa => b"visa",
        }
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, InitSpace, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tier {
    Standard,
    Senior,
}

/// Citizenship or visa held by a wallet. Expiry lives here, on chain, and is
/// the only authority on whether the pass is valid.
#[account]
#[derive(InitSpace, Debug, PartialEq)]
pub struct Pass {
    pub holder: Pubkey,
    pub kind: PassKind,
    pub tier: Tier,
    pub issued_at: i64,
    pub expires_at: i64,
    pub bump: u8,
}

impl Pass {
    pub const SEED: &'static [u8] = b"pass";

    /// Builds a pass and its price. Citizenship runs for a year regardless of
    /// `hours`; visas run for `hours` (1 to 720).
    pub fn issue(
        holder: Pubkey,
        kind: PassKind,
        tier: Tier,
        hours: u64,
        world: &World,
        now: i64,
    ) -> Result<(Self, u64)> {
        let (term, price) = match kind {
            PassKind::Citizenship => {
                let price = match tier {
                    Tier::Standard => world.citizenship_price,
                    Tier::Senior => world.senior_citizenship_price,
                };
                (CITIZENSHIP_TERM_SECS, price)
            }
            PassKind::Visa => {
                require!(hours > 0 && hours <= MAX_VISA_HOURS, TerraError::InvalidDuration);
                let per_hour = match tier {
                    Tier::Standard => world.visa_price_per_hour,
                    Tier::Senior => world.senior_visa_price_per_hour,
                };
                let price = per_hour.checked_mul(hours).ok_or(TerraError::Overflow)?;
                // hours <= 720 so this cannot overflow
                (hours as i64 * 3600, price)
            }
        };

        let expires_at = now.checked_add(term).ok_or(TerraError::Overflow)?;
        let pass = Self { holder, kind, tier, issued_at: now, expires_at, bump: 0 };
        Ok((pass, price))
    }

    pub fn is_active(&self, now: i64) -> bool {
        now < self.expires_at
    }

    pub fn remaining_secs(&self, now: i64) -> i64 {
        (self.expires_at - now).max(0)
    }
}
