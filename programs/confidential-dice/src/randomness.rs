use anchor_lang::prelude::*;

use crate::confidential::{Encrypted, U8};

/// Source of confidential randomness for round openings.
///
/// Output must be uniform over `[0, 255]` and unpredictable to the caller.
/// How it is generated (and verified) is up to the implementation.
pub trait RandomnessSource {
    fn next_byte(&mut self) -> Result<Encrypted<U8>>;
}
