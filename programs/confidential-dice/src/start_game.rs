use anchor_lang::prelude::*;
use inco_lightning::program::IncoLightning;
use crate::constants::PLAYER_SEED;
use crate::inco::Inco;
use crate::round;
use crate::state::PlayerAccount;

/// Player opens a round and gets an encrypted dice roll
///
/// remaining_accounts: [allowance_account, player] pairs, one for the zero
/// balance of a fresh account, then one for the dice handle
pub fn handler<'info>(ctx: Context<'_, '_, '_, 'info, StartGame<'info>>) -> Result<()> {
    let player = ctx.accounts.player.key();

    let mut inco = Inco::new(
        ctx.accounts.inco_lightning_program.to_account_info(),
        ctx.accounts.player.to_account_info(),
        ctx.accounts.system_program.to_account_info(),
        ctx.remaining_accounts,
    );

    let player_account = &mut ctx.accounts.player_account;
    if !player_account.initialized {
        player_account.bump = ctx.bumps.player_account;
    }

    let event = round::open_round(&mut inco, player_account, player)?;
    emit!(event);

    Ok(())
}

#[derive(Accounts)]
pub struct StartGame<'info> {
    #[account(
        init_if_needed,
        payer = player,
        space = PlayerAccount::LEN,
        seeds = [PLAYER_SEED, player.key().as_ref()],
        bump
    )]
    pub player_account: Account<'info, PlayerAccount>,

    #[account(mut)]
    pub player: Signer<'info>,

    /// Inco Lightning program for FHE operations and randomness
    pub inco_lightning_program: Program<'info, IncoLightning>,

    pub system_program: Program<'info, System>,
}
