use anchor_lang::prelude::*;

use crate::access::AccessGrants;
use crate::confidential::{ConfidentialOps, Encrypted, U64, U8};
use crate::constants::{BIG_DICE_THRESHOLD, DICE_FACES, GUESS_BIG, GUESS_SMALL, WIN_REWARD};
use crate::error::DiceError;
use crate::events::{GameStarted, GuessSubmitted};
use crate::ledger::balance_or_zero;
use crate::randomness::RandomnessSource;
use crate::state::{PlayerAccount, RoundState};

/// Opens a round: draws an encrypted dice in 1-6 and marks the round active.
///
/// The dice is `byte % 6 + 1` over a uniform byte, so faces 1-4 come up
/// 43/256 of the time and faces 5-6 42/256.
///
/// A fresh account also gets its encrypted zero balance here. Grants are
/// issued balance first (fresh accounts only), then dice.
pub fn open_round<B>(backend: &mut B, account: &mut PlayerAccount, player: Pubkey) -> Result<GameStarted>
where
    B: ConfidentialOps + AccessGrants + RandomnessSource,
{
    require!(
        account.round_state() == RoundState::NoRound,
        DiceError::ActiveRoundExists
    );

    let fresh_balance = if account.initialized {
        None
    } else {
        Some(balance_or_zero(backend, account)?)
    };

    let byte = backend.next_byte()?;
    let faces = backend.lift(DICE_FACES)?;
    let roll = backend.rem(byte, faces)?;
    let one = backend.lift(1)?;
    let dice: Encrypted<U8> = backend.add(roll, one)?;

    // Grants go before the writes below, so a failed grant leaves the round closed
    if let Some(points) = fresh_balance {
        backend.grant_to_owner(points, player)?;
    }
    backend.grant_to_owner(dice, player)?;

    if let Some(points) = fresh_balance {
        account.mark_opened(player);
        account.points = points.into();
    }
    account.last_dice = dice.into();
    account.has_active_round = true;

    msg!("Round opened for player {}", player);

    Ok(GameStarted {
        player,
        dice_handle: dice.handle(),
    })
}

/// Resolves the active round against an encrypted guess.
///
/// The guess wins when it is 1 for a dice above 3 and 2 otherwise. A win
/// adds `WIN_REWARD` to the balance; a loss adds an encrypted zero. Either
/// way the balance, outcome and reward handles are all replaced.
///
/// Grants are issued balance, outcome, reward. A grant failing partway
/// leaves the account untouched; on-chain the earlier grants revert with it.
pub fn resolve_guess<B>(
    backend: &mut B,
    account: &mut PlayerAccount,
    player: Pubkey,
    ciphertext: &[u8],
    input_type: u8,
) -> Result<GuessSubmitted>
where
    B: ConfidentialOps + AccessGrants,
{
    require!(
        account.round_state() == RoundState::Active,
        DiceError::NoActiveRound
    );
    let guess: Encrypted<U8> = backend.ingest(ciphertext, input_type, &account.owner)?;

    let threshold = backend.lift(BIG_DICE_THRESHOLD)?;
    let dice_is_big = backend.gt(account.last_encrypted_dice(), threshold)?;
    let big = backend.lift(GUESS_BIG)?;
    let small = backend.lift(GUESS_SMALL)?;
    let expected = backend.select(dice_is_big, big, small)?;
    let win = backend.eq(guess, expected)?;

    let prize = backend.lift(WIN_REWARD as u128)?;
    let nothing = backend.lift(0)?;
    let reward: Encrypted<U64> = backend.select(win, prize, nothing)?;
    let points = backend.add(account.encrypted_points(), reward)?;

    let rounds_played = account
        .rounds_played
        .checked_add(1)
        .ok_or(DiceError::ArithmeticOverflow)?;

    backend.grant_to_owner(points, player)?;
    backend.grant_to_owner(win, player)?;
    backend.grant_to_owner(reward, player)?;

    account.points = points.into();
    account.last_win = win.into();
    account.last_reward = reward.into();
    account.has_active_round = false;
    account.rounds_played = rounds_played;

    msg!(
        "Guess resolved for player {} ({} rounds played)",
        player,
        rounds_played
    );

    Ok(GuessSubmitted {
        player,
        reward_handle: reward.handle(),
    })
}
