use anchor_lang::prelude::*;
use inco_lightning::program::IncoLightning;
use crate::access::AccessGrants;
use crate::confidential::ConfidentialOps;
use crate::constants::PLAYER_SEED;
use crate::error::DiceError;
use crate::events::GuessSubmitted;
use crate::inco::Inco;
use crate::round;
use crate::state::PlayerAccount;

/// Player closes the active round with an encrypted guess (1 = big, 2 = small)
///
/// remaining_accounts: [allowance_account, player] pairs for the new
/// balance, outcome and reward handles, in that order
pub fn handler<'info>(
    ctx: Context<'_, '_, '_, 'info, SubmitGuess<'info>>,
    encrypted_guess: Vec<u8>,
    input_type: u8,
) -> Result<()> {
    let player = ctx.accounts.player.key();

    let mut inco = Inco::new(
        ctx.accounts.inco_lightning_program.to_account_info(),
        ctx.accounts.player.to_account_info(),
        ctx.accounts.system_program.to_account_info(),
        ctx.remaining_accounts,
    );

    let event = resolve(
        &mut inco,
        ctx.accounts.player_account.as_deref_mut(),
        player,
        &encrypted_guess,
        input_type,
    )?;
    emit!(event);

    Ok(())
}

/// A player without an account has never opened a round
fn resolve<B>(
    backend: &mut B,
    account: Option<&mut PlayerAccount>,
    player: Pubkey,
    ciphertext: &[u8],
    input_type: u8,
) -> Result<GuessSubmitted>
where
    B: ConfidentialOps + AccessGrants,
{
    let account = account.ok_or_else(|| error!(DiceError::NoActiveRound))?;
    round::resolve_guess(backend, account, player, ciphertext, input_type)
}

#[derive(Accounts)]
pub struct SubmitGuess<'info> {
    #[account(
        mut,
        seeds = [PLAYER_SEED, player.key().as_ref()],
        bump
    )]
    pub player_account: Option<Account<'info, PlayerAccount>>,

    #[account(mut)]
    pub player: Signer<'info>,

    /// Inco Lightning program for FHE operations
    pub inco_lightning_program: Program<'info, IncoLightning>,

    pub system_program: Program<'info, System>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutils::{assert_dice_error, Simulator};

    #[test]
    fn unknown_player_has_no_active_round() {
        let mut sim = Simulator::new();
        let player = Pubkey::new_unique();
        let guess = sim.encrypt_input(1, &player);

        assert_dice_error(
            resolve(&mut sim, None, player, &guess, 0),
            DiceError::NoActiveRound,
        );
        assert_eq!(sim.handle_count(), 0);
    }

    #[test]
    fn opened_account_resolves() {
        let mut sim = Simulator::new();
        let player = Pubkey::new_unique();
        let mut account = PlayerAccount::empty();
        round::open_round(&mut sim, &mut account, player).unwrap();

        let guess = sim.encrypt_input(2, &player);
        let event = resolve(&mut sim, Some(&mut account), player, &guess, 0).unwrap();

        assert_eq!(event.player, player);
        assert!(!account.has_active_round());
        assert_eq!(account.rounds_played, 1);
    }
}
