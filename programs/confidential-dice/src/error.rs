use anchor_lang::prelude::*;

#[error_code]
pub enum DiceError {
    #[msg("Payment too small to buy any points")]
    InsufficientPayment,

    #[msg("Player already has an active round")]
    ActiveRoundExists,

    #[msg("No active round for this player")]
    NoActiveRound,

    #[msg("Encrypted input failed validation")]
    InvalidProof,

    #[msg("Missing allowance accounts for decrypt grant")]
    MissingAllowanceAccounts,

    #[msg("Allowance account does not belong to the grantee")]
    AllowanceMismatch,

    #[msg("Arithmetic overflow")]
    ArithmeticOverflow,
}
