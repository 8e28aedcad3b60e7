use anchor_lang::prelude::*;

use crate::access::AccessGrants;
use crate::confidential::{ConfidentialOps, Encrypted, U64};
use crate::constants::{LAMPORTS_PER_COIN, POINTS_PER_SOL};
use crate::error::DiceError;
use crate::events::PointsPurchased;
use crate::state::PlayerAccount;

/// Points bought by `paid_lamports`, rounded down.
///
/// POINTS_PER_SOL < LAMPORTS_PER_COIN, so the quote never exceeds the payment.
pub fn quote(paid_lamports: u64) -> u64 {
    let points = paid_lamports as u128 * POINTS_PER_SOL as u128 / LAMPORTS_PER_COIN as u128;
    points as u64
}

/// Stored balance, or a fresh encrypted zero for an account that never held points
pub(crate) fn balance_or_zero<B: ConfidentialOps>(
    backend: &mut B,
    account: &PlayerAccount,
) -> Result<Encrypted<U64>> {
    if account.initialized {
        Ok(account.encrypted_points())
    } else {
        backend.lift(0)
    }
}

/// Credits the quote for `paid_lamports` to the player's encrypted balance
pub fn purchase<B>(
    backend: &mut B,
    account: &mut PlayerAccount,
    player: Pubkey,
    paid_lamports: u64,
) -> Result<PointsPurchased>
where
    B: ConfidentialOps + AccessGrants,
{
    let points_added = quote(paid_lamports);
    require!(points_added > 0, DiceError::InsufficientPayment);

    let balance = balance_or_zero(backend, account)?;
    let added = backend.lift(points_added as u128)?;
    let points = backend.add(balance, added)?;
    backend.grant_to_owner(points, player)?;

    if !account.initialized {
        account.mark_opened(player);
    }
    account.points = points.into();

    msg!(
        "Player {} paid {} lamports for {} points",
        player,
        paid_lamports,
        points_added
    );

    Ok(PointsPurchased {
        player,
        paid_lamports,
        points_added,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::Grantee;
    use crate::testutils::{assert_dice_error, Simulator};

    const ONE_SOL: u64 = LAMPORTS_PER_COIN;

    #[test]
    fn quote_one_coin() {
        assert_eq!(quote(ONE_SOL), 100_000);
        assert_eq!(quote(0), 0);
    }

    #[test]
    fn quote_is_linear() {
        // Exact for whole points; flooring breaks linearity below 10_000 lamports
        for paid in [10_000, 123_450_000, ONE_SOL, 7 * ONE_SOL + 30_000] {
            assert_eq!(quote(2 * paid), 2 * quote(paid));
        }
    }

    #[test]
    fn quote_rounds_down() {
        // 10_000 lamports buy exactly one point
        assert_eq!(quote(9_999), 0);
        assert_eq!(quote(10_000), 1);
        assert_eq!(quote(19_999), 1);
    }

    #[test]
    fn quote_handles_max_payment() {
        assert_eq!(quote(u64::MAX), u64::MAX / 10_000);
    }

    #[test]
    fn purchase_credits_encrypted_balance() {
        let mut sim = Simulator::new();
        let mut account = PlayerAccount::empty();
        let player = Pubkey::new_unique();

        let event = purchase(&mut sim, &mut account, player, ONE_SOL).unwrap();

        assert_eq!(event.player, player);
        assert_eq!(event.paid_lamports, ONE_SOL);
        assert_eq!(event.points_added, 100_000);
        assert_eq!(sim.decrypt(account.encrypted_points()), Some(100_000));
        assert_eq!(account.owner, player);
        assert!(account.initialized);
    }

    #[test]
    fn purchases_accumulate() {
        let mut sim = Simulator::new();
        let mut account = PlayerAccount::empty();
        let player = Pubkey::new_unique();

        purchase(&mut sim, &mut account, player, ONE_SOL).unwrap();
        let first = account.encrypted_points().handle();
        purchase(&mut sim, &mut account, player, ONE_SOL / 2).unwrap();

        assert_ne!(account.encrypted_points().handle(), first);
        assert_eq!(sim.decrypt(account.encrypted_points()), Some(150_000));
    }

    #[test]
    fn purchase_grants_balance_to_program_and_player() {
        let mut sim = Simulator::new();
        let mut account = PlayerAccount::empty();
        let player = Pubkey::new_unique();

        purchase(&mut sim, &mut account, player, ONE_SOL).unwrap();

        let handle = account.encrypted_points().handle();
        assert!(sim.is_granted(handle, Grantee::Program));
        assert!(sim.is_granted(handle, Grantee::Player(player)));
        assert!(!sim.is_granted(handle, Grantee::Player(Pubkey::new_unique())));
    }

    #[test]
    fn zero_quote_purchase_leaves_state_untouched() {
        let mut sim = Simulator::new();
        let mut account = PlayerAccount::empty();
        let player = Pubkey::new_unique();
        purchase(&mut sim, &mut account, player, ONE_SOL).unwrap();
        let before = account.encrypted_points().handle();
        let grants_before = sim.grants().len();

        assert_dice_error(
            purchase(&mut sim, &mut account, player, 9_999),
            DiceError::InsufficientPayment,
        );

        assert_eq!(account.encrypted_points().handle(), before);
        assert_eq!(sim.decrypt(account.encrypted_points()), Some(100_000));
        assert_eq!(sim.grants().len(), grants_before);
    }

    #[test]
    fn zero_quote_purchase_does_not_open_account() {
        let mut sim = Simulator::new();
        let mut account = PlayerAccount::empty();

        assert_dice_error(
            purchase(&mut sim, &mut account, Pubkey::new_unique(), 0),
            DiceError::InsufficientPayment,
        );
        assert!(!account.initialized);
        assert_eq!(sim.handle_count(), 0);
    }
}
