use anchor_lang::prelude::*;
use inco_lightning::cpi::accounts::{Allow, Operation};
use inco_lightning::cpi::{
    allow, as_euint128, e_add, e_eq, e_gt, e_rand, e_rem, e_select, new_euint128,
};

use crate::access::{AccessGrants, Grantee};
use crate::confidential::{Bool, ConfidentialOps, Encrypted, IntWidth, U8};
use crate::constants::BYTE_RANGE;
use crate::error::DiceError;
use crate::randomness::RandomnessSource;

/// Scalar byte for operations whose operands are all handles
const ENCRYPTED_OPERANDS: u8 = 16;

/// Confidential backend that runs every operation as a CPI into Inco Lightning.
///
/// Player grants consume `(allowance_account, allowed_address)` pairs from
/// `remaining_accounts`, in the order the grants are issued.
pub struct Inco<'a, 'info> {
    program: AccountInfo<'info>,
    signer: AccountInfo<'info>,
    system_program: AccountInfo<'info>,
    allowances: AllowancePairs<'a, 'info>,
}

/// Cursor over the `(allowance_account, allowed_address)` pairs of
/// `remaining_accounts`
struct AllowancePairs<'a, 'info> {
    accounts: &'a [AccountInfo<'info>],
    next: usize,
}

impl<'a, 'info> AllowancePairs<'a, 'info> {
    fn new(accounts: &'a [AccountInfo<'info>]) -> Self {
        Self { accounts, next: 0 }
    }

    /// Takes the next pair; the cursor only moves when its address is `player`
    fn next_pair(
        &mut self,
        player: Pubkey,
    ) -> Result<(&'a AccountInfo<'info>, &'a AccountInfo<'info>)> {
        let pair = self
            .accounts
            .get(self.next..self.next + 2)
            .ok_or(DiceError::MissingAllowanceAccounts)?;
        let (allowance_account, allowed_address) = (&pair[0], &pair[1]);
        require_keys_eq!(*allowed_address.key, player, DiceError::AllowanceMismatch);

        self.next += 2;
        Ok((allowance_account, allowed_address))
    }
}

impl<'a, 'info> Inco<'a, 'info> {
    pub fn new(
        program: AccountInfo<'info>,
        signer: AccountInfo<'info>,
        system_program: AccountInfo<'info>,
        allowance_accounts: &'a [AccountInfo<'info>],
    ) -> Self {
        Self {
            program,
            signer,
            system_program,
            allowances: AllowancePairs::new(allowance_accounts),
        }
    }

    fn operation(&self) -> CpiContext<'_, '_, '_, 'info, Operation<'info>> {
        CpiContext::new(
            self.program.clone(),
            Operation {
                signer: self.signer.clone(),
            },
        )
    }
}

impl<'a, 'info> ConfidentialOps for Inco<'a, 'info> {
    fn lift<W: IntWidth>(&mut self, value: u128) -> Result<Encrypted<W>> {
        Ok(as_euint128(self.operation(), value)?.into())
    }

    fn add<W: IntWidth>(&mut self, lhs: Encrypted<W>, rhs: Encrypted<W>) -> Result<Encrypted<W>> {
        Ok(e_add(self.operation(), lhs.into(), rhs.into(), ENCRYPTED_OPERANDS)?.into())
    }

    fn rem<W: IntWidth>(&mut self, lhs: Encrypted<W>, rhs: Encrypted<W>) -> Result<Encrypted<W>> {
        Ok(e_rem(self.operation(), lhs.into(), rhs.into(), ENCRYPTED_OPERANDS)?.into())
    }

    fn gt<W: IntWidth>(&mut self, lhs: Encrypted<W>, rhs: Encrypted<W>) -> Result<Encrypted<Bool>> {
        Ok(e_gt(self.operation(), lhs.into(), rhs.into(), ENCRYPTED_OPERANDS)?.into())
    }

    fn eq<W: IntWidth>(&mut self, lhs: Encrypted<W>, rhs: Encrypted<W>) -> Result<Encrypted<Bool>> {
        Ok(e_eq(self.operation(), lhs.into(), rhs.into(), ENCRYPTED_OPERANDS)?.into())
    }

    fn select<W: IntWidth>(
        &mut self,
        cond: Encrypted<Bool>,
        if_true: Encrypted<W>,
        if_false: Encrypted<W>,
    ) -> Result<Encrypted<W>> {
        let selected = e_select(
            self.operation(),
            cond.into(),
            if_true.into(),
            if_false.into(),
            ENCRYPTED_OPERANDS,
        )?;
        Ok(selected.into())
    }

    fn ingest<W: IntWidth>(
        &mut self,
        ciphertext: &[u8],
        input_type: u8,
        owner: &Pubkey,
    ) -> Result<Encrypted<W>> {
        require!(!ciphertext.is_empty(), DiceError::InvalidProof);
        // Inco binds the input to the signer, so only the owner can submit it
        require_keys_eq!(*self.signer.key, *owner, DiceError::InvalidProof);

        let handle = new_euint128(self.operation(), ciphertext.to_vec(), input_type)
            .map_err(|_| error!(DiceError::InvalidProof))?;
        Ok(handle.into())
    }
}

impl<'a, 'info> AccessGrants for Inco<'a, 'info> {
    fn grant(&mut self, handle: u128, grantee: Grantee) -> Result<()> {
        let player = match grantee {
            // Inco keeps handles produced through our own CPIs usable by us
            Grantee::Program => return Ok(()),
            Grantee::Player(player) => player,
        };

        let (allowance_account, allowed_address) = self.allowances.next_pair(player)?;

        allow(
            CpiContext::new(
                self.program.clone(),
                Allow {
                    allowance_account: allowance_account.clone(),
                    signer: self.signer.clone(),
                    allowed_address: allowed_address.clone(),
                    system_program: self.system_program.clone(),
                },
            ),
            handle,
            true,
            player,
        )?;

        msg!("Granted decrypt permission for handle {} to {}", handle, player);
        Ok(())
    }
}

impl<'a, 'info> RandomnessSource for Inco<'a, 'info> {
    fn next_byte(&mut self) -> Result<Encrypted<U8>> {
        let random = e_rand(self.operation(), ENCRYPTED_OPERANDS)?;
        let range = as_euint128(self.operation(), BYTE_RANGE)?;
        let byte = e_rem(self.operation(), random, range, ENCRYPTED_OPERANDS)?;
        Ok(byte.into())
    }
}
