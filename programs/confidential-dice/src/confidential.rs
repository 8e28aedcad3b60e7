use std::marker::PhantomData;

use anchor_lang::prelude::*;
use inco_lightning::types::{Ebool, Euint128};

/// Bit width carried by an encrypted handle
pub trait Width: Copy {
    const BITS: u32;

    fn mask() -> u128 {
        if Self::BITS >= 128 {
            u128::MAX
        } else {
            (1u128 << Self::BITS) - 1
        }
    }
}

/// Widths that support arithmetic (everything but booleans)
pub trait IntWidth: Width {}

#[derive(Clone, Copy, Debug)]
pub struct U8;

#[derive(Clone, Copy, Debug)]
pub struct U64;

#[derive(Clone, Copy, Debug)]
pub struct Bool;

impl Width for U8 {
    const BITS: u32 = 8;
}

impl Width for U64 {
    const BITS: u32 = 64;
}

impl Width for Bool {
    const BITS: u32 = 1;
}

impl IntWidth for U8 {}
impl IntWidth for U64 {}

/// Opaque handle to an encrypted value of width `W`.
///
/// Handles are immutable. Updating a stored value means storing the handle
/// returned by an operation. There is no `PartialEq`: two handles say nothing
/// about their plaintexts, so comparisons go through [`ConfidentialOps`].
#[derive(Clone, Copy, Debug)]
pub struct Encrypted<W: Width> {
    handle: u128,
    width: PhantomData<W>,
}

impl<W: Width> Encrypted<W> {
    pub fn from_handle(handle: u128) -> Self {
        Self {
            handle,
            width: PhantomData,
        }
    }

    pub fn handle(&self) -> u128 {
        self.handle
    }
}

impl<W: IntWidth> From<Euint128> for Encrypted<W> {
    fn from(value: Euint128) -> Self {
        Self::from_handle(value.0)
    }
}

impl<W: IntWidth> From<Encrypted<W>> for Euint128 {
    fn from(value: Encrypted<W>) -> Self {
        Euint128(value.handle)
    }
}

impl From<Ebool> for Encrypted<Bool> {
    fn from(value: Ebool) -> Self {
        Self::from_handle(value.0)
    }
}

impl From<Encrypted<Bool>> for Ebool {
    fn from(value: Encrypted<Bool>) -> Self {
        Ebool(value.handle)
    }
}

/// Homomorphic operations the ledger and round logic are built on.
///
/// Every operation returns a new handle; nothing is decrypted on the way.
/// Implemented by [`crate::inco::Inco`] on-chain and by the simulator in
/// tests.
pub trait ConfidentialOps {
    /// Lifts a known constant into the encrypted domain
    fn lift<W: IntWidth>(&mut self, value: u128) -> Result<Encrypted<W>>;

    fn add<W: IntWidth>(&mut self, lhs: Encrypted<W>, rhs: Encrypted<W>) -> Result<Encrypted<W>>;

    fn rem<W: IntWidth>(&mut self, lhs: Encrypted<W>, rhs: Encrypted<W>) -> Result<Encrypted<W>>;

    fn gt<W: IntWidth>(&mut self, lhs: Encrypted<W>, rhs: Encrypted<W>) -> Result<Encrypted<Bool>>;

    fn eq<W: IntWidth>(&mut self, lhs: Encrypted<W>, rhs: Encrypted<W>) -> Result<Encrypted<Bool>>;

    /// `cond ? if_true : if_false`, evaluated without revealing `cond`
    fn select<W: IntWidth>(
        &mut self,
        cond: Encrypted<Bool>,
        if_true: Encrypted<W>,
        if_false: Encrypted<W>,
    ) -> Result<Encrypted<W>>;

    /// Validates a client-encrypted input bound to `owner` and this program.
    /// Fails with `InvalidProof` when the ciphertext does not validate.
    fn ingest<W: IntWidth>(
        &mut self,
        ciphertext: &[u8],
        input_type: u8,
        owner: &Pubkey,
    ) -> Result<Encrypted<W>>;
}
