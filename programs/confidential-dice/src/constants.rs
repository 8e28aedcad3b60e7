use anchor_lang::solana_program::native_token::LAMPORTS_PER_SOL;

/// Points credited for one full SOL paid
pub const POINTS_PER_SOL: u64 = 100_000;

/// Smallest payment unit per full coin
pub const LAMPORTS_PER_COIN: u64 = LAMPORTS_PER_SOL;

/// Points credited for a correct guess
pub const WIN_REWARD: u64 = 10_000;

pub const DICE_FACES: u128 = 6;

/// Dice values strictly above this count as "big"
pub const BIG_DICE_THRESHOLD: u128 = 3;

/// Guess encoding: 1 = big (4-6), 2 = small (1-3)
pub const GUESS_BIG: u128 = 1;
pub const GUESS_SMALL: u128 = 2;

/// Range of a single random byte
pub const BYTE_RANGE: u128 = 256;

pub const PLAYER_SEED: &[u8] = b"player";
pub const VAULT_SEED: &[u8] = b"vault";
