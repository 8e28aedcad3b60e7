//! In-process confidential backend for tests.
//!
//! `Simulator` keeps the plaintext behind every handle it hands out, so tests
//! can decrypt results that the program itself never sees.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use anchor_lang::prelude::*;

use crate::access::{AccessGrants, GrantRegistry, Grantee};
use crate::confidential::{Bool, ConfidentialOps, Encrypted, IntWidth, Width, U8};
use crate::error::DiceError;
use crate::randomness::RandomnessSource;

/// Simulated input: program id (32) || owner (32) || value (1)
const INPUT_LEN: usize = 65;

pub struct Simulator {
    plaintexts: BTreeMap<u128, u128>,
    next_handle: u128,
    grants: GrantRegistry,
    denied_players: BTreeSet<Pubkey>,
    scripted_bytes: VecDeque<u8>,
    rng: u64,
    program_id: Pubkey,
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulator {
    pub fn new() -> Self {
        Self {
            plaintexts: BTreeMap::new(),
            // 0 is the handle of a never-written field
            next_handle: 1,
            grants: GrantRegistry::new(),
            denied_players: BTreeSet::new(),
            scripted_bytes: VecDeque::new(),
            rng: 0x9E37_79B9_7F4A_7C15,
            program_id: crate::ID,
        }
    }

    /// Random bytes are served from `bytes` first, then from a xorshift stream
    pub fn with_random_bytes(bytes: impl IntoIterator<Item = u8>) -> Self {
        let mut simulator = Self::new();
        simulator.push_random_bytes(bytes);
        simulator
    }

    pub fn push_random_bytes(&mut self, bytes: impl IntoIterator<Item = u8>) {
        self.scripted_bytes.extend(bytes);
    }

    /// Player grants to `player` fail as if their allowance accounts were
    /// left out of the instruction
    pub fn deny_grants_to(&mut self, player: Pubkey) {
        self.denied_players.insert(player);
    }

    pub fn decrypt<W: Width>(&self, value: Encrypted<W>) -> Option<u128> {
        self.plaintexts.get(&value.handle()).copied()
    }

    /// Encrypts a client input the way a relayer would for `owner`
    pub fn encrypt_input(&self, value: u8, owner: &Pubkey) -> Vec<u8> {
        let mut ciphertext = Vec::with_capacity(INPUT_LEN);
        ciphertext.extend_from_slice(self.program_id.as_ref());
        ciphertext.extend_from_slice(owner.as_ref());
        ciphertext.push(value);
        ciphertext
    }

    pub fn is_granted(&self, handle: u128, grantee: Grantee) -> bool {
        self.grants.is_granted(handle, grantee)
    }

    pub fn grants(&self) -> &GrantRegistry {
        &self.grants
    }

    pub fn handle_count(&self) -> usize {
        self.plaintexts.len()
    }

    fn store<W: Width>(&mut self, value: u128) -> Encrypted<W> {
        let handle = self.next_handle;
        self.next_handle += 1;
        self.plaintexts.insert(handle, value & W::mask());
        Encrypted::from_handle(handle)
    }

    fn read<W: Width>(&self, value: Encrypted<W>) -> Result<u128> {
        self.decrypt(value)
            .ok_or_else(|| ProgramError::InvalidArgument.into())
    }

    fn next_random(&mut self) -> u8 {
        if let Some(byte) = self.scripted_bytes.pop_front() {
            return byte;
        }
        self.rng ^= self.rng << 13;
        self.rng ^= self.rng >> 7;
        self.rng ^= self.rng << 17;
        (self.rng >> 24) as u8
    }
}

/// Asserts that `result` failed with `expected`
#[track_caller]
pub fn assert_dice_error<T: std::fmt::Debug>(result: Result<T>, expected: DiceError) {
    let err = result.expect_err("call should have failed");
    assert_eq!(err, anchor_lang::error::Error::from(expected));
}

impl ConfidentialOps for Simulator {
    fn lift<W: IntWidth>(&mut self, value: u128) -> Result<Encrypted<W>> {
        Ok(self.store(value))
    }

    fn add<W: IntWidth>(&mut self, lhs: Encrypted<W>, rhs: Encrypted<W>) -> Result<Encrypted<W>> {
        let sum = self.read(lhs)?.wrapping_add(self.read(rhs)?);
        Ok(self.store(sum))
    }

    fn rem<W: IntWidth>(&mut self, lhs: Encrypted<W>, rhs: Encrypted<W>) -> Result<Encrypted<W>> {
        let rem = self
            .read(lhs)?
            .checked_rem(self.read(rhs)?)
            .ok_or(DiceError::ArithmeticOverflow)?;
        Ok(self.store(rem))
    }

    fn gt<W: IntWidth>(&mut self, lhs: Encrypted<W>, rhs: Encrypted<W>) -> Result<Encrypted<Bool>> {
        let gt = self.read(lhs)? > self.read(rhs)?;
        Ok(self.store(gt as u128))
    }

    fn eq<W: IntWidth>(&mut self, lhs: Encrypted<W>, rhs: Encrypted<W>) -> Result<Encrypted<Bool>> {
        let eq = self.read(lhs)? == self.read(rhs)?;
        Ok(self.store(eq as u128))
    }

    fn select<W: IntWidth>(
        &mut self,
        cond: Encrypted<Bool>,
        if_true: Encrypted<W>,
        if_false: Encrypted<W>,
    ) -> Result<Encrypted<W>> {
        let chosen = if self.read(cond)? == 1 {
            self.read(if_true)?
        } else {
            self.read(if_false)?
        };
        Ok(self.store(chosen))
    }

    fn ingest<W: IntWidth>(
        &mut self,
        ciphertext: &[u8],
        _input_type: u8,
        owner: &Pubkey,
    ) -> Result<Encrypted<W>> {
        require!(ciphertext.len() == INPUT_LEN, DiceError::InvalidProof);
        require!(
            ciphertext[..32] == self.program_id.to_bytes()[..],
            DiceError::InvalidProof
        );
        require!(
            ciphertext[32..64] == owner.to_bytes()[..],
            DiceError::InvalidProof
        );
        Ok(self.store(ciphertext[64] as u128))
    }
}

impl AccessGrants for Simulator {
    fn grant(&mut self, handle: u128, grantee: Grantee) -> Result<()> {
        if let Grantee::Player(player) = grantee {
            require!(
                !self.denied_players.contains(&player),
                DiceError::MissingAllowanceAccounts
            );
        }
        self.grants.insert(handle, grantee);
        Ok(())
    }
}

impl RandomnessSource for Simulator {
    fn next_byte(&mut self) -> Result<Encrypted<U8>> {
        let byte = self.next_random();
        Ok(self.store(byte as u128))
    }
}
