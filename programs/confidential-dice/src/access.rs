use std::collections::{BTreeMap, BTreeSet};

use anchor_lang::prelude::*;

use crate::confidential::{Encrypted, Width};

/// Who may request the plaintext of a handle
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Grantee {
    /// This program's own later operations
    Program,
    /// A player's off-chain client
    Player(Pubkey),
}

/// Records decryption rights. The program only writes grants; the external
/// disclosure protocol enforces them.
pub trait AccessGrants {
    /// Idempotent
    fn grant(&mut self, handle: u128, grantee: Grantee) -> Result<()>;

    /// Grants `value` to the program and to `owner`.
    ///
    /// Not atomic on its own: a failed player grant leaves the program grant
    /// in place. Callers issue grants before writing any account field, and
    /// on-chain the failed instruction reverts every earlier `allow` CPI.
    fn grant_to_owner<W: Width>(&mut self, value: Encrypted<W>, owner: Pubkey) -> Result<()> {
        self.grant(value.handle(), Grantee::Program)?;
        self.grant(value.handle(), Grantee::Player(owner))
    }
}

/// In-memory grant table keyed by handle
#[derive(Clone, Debug, Default)]
pub struct GrantRegistry {
    grants: BTreeMap<u128, BTreeSet<Grantee>>,
}

impl GrantRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the grant was new
    pub fn insert(&mut self, handle: u128, grantee: Grantee) -> bool {
        self.grants.entry(handle).or_default().insert(grantee)
    }

    pub fn is_granted(&self, handle: u128, grantee: Grantee) -> bool {
        self.grants
            .get(&handle)
            .is_some_and(|grantees| grantees.contains(&grantee))
    }

    #[cfg(test)]
    pub(crate) fn grantees(&self, handle: u128) -> impl Iterator<Item = &Grantee> {
        self.grants.get(&handle).into_iter().flatten()
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.grants.values().map(BTreeSet::len).sum()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.grants.is_empty()
    }
}

impl AccessGrants for GrantRegistry {
    fn grant(&mut self, handle: u128, grantee: Grantee) -> Result<()> {
        self.insert(handle, grantee);
        Ok(())
    }
}
