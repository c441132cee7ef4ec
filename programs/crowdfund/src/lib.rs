#![allow(unexpected_cfgs)]

use anchor_lang::prelude::*;

pub mod client;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod ledger;
pub mod pda;
pub mod query;
pub mod states;

use instructions::*;

declare_id!("D2PY261U7to4M3EW9xkhhZaeNirDmqcksbcmGfd4Bh12");

#[program]
pub mod crowdfund {
    use super::*;

    pub fn create(ctx: Context<Create>, name: String, description: String) -> Result<()> {
        instructions::create_campaign(ctx, name, description)
    }

    pub fn donate(ctx: Context<Donate>, amount: u64) -> Result<()> {
        instructions::donate_to_campaign(ctx, amount)
    }

    pub fn withdraw(ctx: Context<Withdraw>, amount: u64) -> Result<()> {
        instructions::withdraw_from_campaign(ctx, amount)
    }
}
