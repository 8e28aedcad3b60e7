use anchor_lang::prelude::*;
use anchor_lang::system_program;
use inco_lightning::program::IncoLightning;
use crate::constants::{PLAYER_SEED, VAULT_SEED};
use crate::inco::Inco;
use crate::ledger;
use crate::state::PlayerAccount;

/// Player buys encrypted points with lamports
///
/// Lamports go to the vault; the quote is added to the encrypted balance.
///
/// remaining_accounts: [allowance_account, player] for the new balance handle
pub fn handler<'info>(
    ctx: Context<'_, '_, '_, 'info, BuyPoints<'info>>,
    paid_lamports: u64,
) -> Result<()> {
    let player = ctx.accounts.player.key();

    // Transfer SOL from player to vault
    system_program::transfer(
        CpiContext::new(
            ctx.accounts.system_program.to_account_info(),
            system_program::Transfer {
                from: ctx.accounts.player.to_account_info(),
                to: ctx.accounts.vault.to_account_info(),
            },
        ),
        paid_lamports,
    )?;

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

    let event = ledger::purchase(&mut inco, player_account, player, paid_lamports)?;
    emit!(event);

    Ok(())
}

#[derive(Accounts)]
pub struct BuyPoints<'info> {
    #[account(
        init_if_needed,
        payer = player,
        space = PlayerAccount::LEN,
        seeds = [PLAYER_SEED, player.key().as_ref()],
        bump
    )]
    pub player_account: Account<'info, PlayerAccount>,

    /// CHECK: Vault PDA receiving purchase payments
    #[account(
        mut,
        seeds = [VAULT_SEED],
        bump
    )]
    pub vault: AccountInfo<'info>,

    #[account(mut)]
    pub player: Signer<'info>,

    /// Inco Lightning program for FHE operations
    pub inco_lightning_program: Program<'info, IncoLightning>,

    pub system_program: Program<'info, System>,
}
