use anchor_lang::prelude::*;

#[event]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointsPurchased {
    pub player: Pubkey,
    pub paid_lamports: u64,
    /// Public: a deterministic function of the public payment
    pub points_added: u64,
}

#[event]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameStarted {
    pub player: Pubkey,
    /// Opaque handle of the encrypted dice, never the plaintext
    pub dice_handle: u128,
}

#[event]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessSubmitted {
    pub player: Pubkey,
    pub reward_handle: u128,
}
