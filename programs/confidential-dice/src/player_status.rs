use anchor_lang::prelude::*;
use crate::constants::PLAYER_SEED;
use crate::state::PlayerAccount;

/// Round flag and encrypted handles of a player, as opaque references.
/// All-zero handles mean the player has never played.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct PlayerStatus {
    pub has_active_round: bool,
    pub points_handle: u128,
    pub dice_handle: u128,
    pub win_handle: u128,
    pub reward_handle: u128,
    pub rounds_played: u64,
}

impl From<&PlayerAccount> for PlayerStatus {
    fn from(account: &PlayerAccount) -> Self {
        Self {
            has_active_round: account.has_active_round(),
            points_handle: account.encrypted_points().handle(),
            dice_handle: account.last_encrypted_dice().handle(),
            win_handle: account.last_encrypted_win().handle(),
            reward_handle: account.last_encrypted_reward().handle(),
            rounds_played: account.rounds_played,
        }
    }
}

/// Reads any player's status; no signer-based state
pub fn handler(ctx: Context<GetPlayerStatus>, player: Pubkey) -> Result<PlayerStatus> {
    let status = match &ctx.accounts.player_account {
        Some(account) => PlayerStatus::from(&**account),
        None => PlayerStatus::default(),
    };

    msg!(
        "Player {} active round: {}",
        player,
        status.has_active_round
    );
    Ok(status)
}

#[derive(Accounts)]
#[instruction(player: Pubkey)]
pub struct GetPlayerStatus<'info> {
    #[account(
        seeds = [PLAYER_SEED, player.as_ref()],
        bump
    )]
    pub player_account: Option<Account<'info, PlayerAccount>>,
}
