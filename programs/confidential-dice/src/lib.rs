#![allow(unexpected_cfgs)]

use anchor_lang::prelude::*;

pub mod constants;
pub mod error;
pub mod events;
pub mod state;

pub mod access;
pub mod confidential;
pub mod inco;
pub mod randomness;

pub mod ledger;
pub mod round;

pub mod buy_points;
pub mod start_game;
pub mod submit_guess;
pub mod quote_points;
pub mod player_status;

#[cfg(any(test, feature = "testutils"))]
pub mod testutils;

use buy_points::*;
use start_game::*;
use submit_guess::*;
use quote_points::*;
use player_status::*;

declare_id!("92dUVRqAnnxBisUU9mHaksERZbzkqJ3TyWVQZeNMeJZm");

#[program]
pub mod confidential_dice {
    use super::*;

    /// Player buys encrypted points (100_000 points per SOL)
    pub fn buy_points<'info>(
        ctx: Context<'_, '_, '_, 'info, BuyPoints<'info>>,
        paid_lamports: u64,
    ) -> Result<()> {
        buy_points::handler(ctx, paid_lamports)
    }

    /// Player opens a round; an encrypted dice (1-6) is drawn
    pub fn start_game<'info>(ctx: Context<'_, '_, '_, 'info, StartGame<'info>>) -> Result<()> {
        start_game::handler(ctx)
    }

    /// Player resolves the open round with an encrypted guess
    /// 1 = big (dice 4-6), 2 = small (dice 1-3); a hit pays 10_000 points
    pub fn submit_guess<'info>(
        ctx: Context<'_, '_, '_, 'info, SubmitGuess<'info>>,
        encrypted_guess: Vec<u8>,
        input_type: u8,
    ) -> Result<()> {
        submit_guess::handler(ctx, encrypted_guess, input_type)
    }

    /// Plaintext points a payment would buy
    pub fn quote_points(ctx: Context<QuotePoints>, paid_lamports: u64) -> Result<u64> {
        quote_points::handler(ctx, paid_lamports)
    }

    /// Round flag and encrypted handles for any player
    pub fn get_player_status(ctx: Context<GetPlayerStatus>, player: Pubkey) -> Result<PlayerStatus> {
        player_status::handler(ctx, player)
    }
}
