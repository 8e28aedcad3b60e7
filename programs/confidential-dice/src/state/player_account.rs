use anchor_lang::prelude::*;
use inco_lightning::types::{Ebool, Euint128};

use super::RoundState;
use crate::confidential::{Bool, Encrypted, U64, U8};

/// Per-player ledger and round state
#[account]
pub struct PlayerAccount {
    /// Wallet this account belongs to
    pub owner: Pubkey,
    /// Encrypted point balance
    pub points: Euint128,
    /// Whether a round is waiting for a guess
    pub has_active_round: bool,
    /// Encrypted dice of the current or last round (1-6)
    pub last_dice: Euint128,
    /// Encrypted outcome of the last resolved round
    pub last_win: Ebool,
    /// Encrypted reward of the last resolved round
    pub last_reward: Euint128,
    /// Number of resolved rounds
    pub rounds_played: u64,
    /// Set once `points` holds a real encrypted balance
    pub initialized: bool,
    /// Bump seed for PDA
    pub bump: u8,
}

impl PlayerAccount {
    /// 8 (discriminator) + 32 (owner) + 16 (points) + 1 (has_active_round)
    /// + 16 (last_dice) + 16 (last_win) + 16 (last_reward) + 8 (rounds_played)
    /// + 1 (initialized) + 1 (bump)
    pub const LEN: usize = 8 + 32 + 16 + 1 + 16 + 16 + 16 + 8 + 1 + 1;

    pub fn round_state(&self) -> RoundState {
        if self.has_active_round {
            RoundState::Active
        } else {
            RoundState::NoRound
        }
    }

    pub fn has_active_round(&self) -> bool {
        self.has_active_round
    }

    pub fn encrypted_points(&self) -> Encrypted<U64> {
        self.points.into()
    }

    pub fn last_encrypted_dice(&self) -> Encrypted<U8> {
        self.last_dice.into()
    }

    pub fn last_encrypted_win(&self) -> Encrypted<Bool> {
        self.last_win.into()
    }

    pub fn last_encrypted_reward(&self) -> Encrypted<U64> {
        self.last_reward.into()
    }

    /// Binds a fresh account to its owner
    pub(crate) fn mark_opened(&mut self, owner: Pubkey) {
        self.owner = owner;
        self.initialized = true;
    }
}

#[cfg(test)]
impl PlayerAccount {
    pub(crate) fn empty() -> Self {
        Self {
            owner: Pubkey::default(),
            points: Euint128::default(),
            has_active_round: false,
            last_dice: Euint128::default(),
            last_win: Ebool::default(),
            last_reward: Euint128::default(),
            rounds_played: 0,
            initialized: false,
            bump: 0,
        }
    }
}
