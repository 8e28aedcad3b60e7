use anchor_lang::prelude::*;

pub mod player_account;

pub use player_account::*;

/// Round lifecycle for a single player
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug, Default)]
#[repr(u8)]
pub enum RoundState {
    /// No dice drawn, ready to open a round
    #[default]
    NoRound = 0,
    /// Dice drawn, waiting for the player's guess
    Active = 1,
}

