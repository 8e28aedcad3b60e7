use anchor_lang::prelude::*;
use crate::ledger;

/// Points a payment of `paid_lamports` would buy (returned as return data)
pub fn handler(_ctx: Context<QuotePoints>, paid_lamports: u64) -> Result<u64> {
    let points = ledger::quote(paid_lamports);
    msg!("Quote: {} lamports -> {} points", paid_lamports, points);
    Ok(points)
}

#[derive(Accounts)]
pub struct QuotePoints {}
