use anchor_lang::prelude::*;
use anchor_lang::system_program::{self, Transfer};

use crate::{errors::CampaignError, events::DonationReceived, states::Campaign};

#[derive(Accounts)]
pub struct Donate<'info> {
  #[account(mut)]
  /// CHECK: owner, discriminator and ["CAMPAIGN_DEMO", owner] address checked by Campaign::load
  pub campaign: UncheckedAccount<'info>,
  #[account(mut)]
  pub user: Signer<'info>,
  pub system_program: Program<'info, System>,
}

pub fn donate_to_campaign(ctx: Context<Donate>, amount: u64) -> Result<()> {
  let campaign_info = ctx.accounts.campaign.to_account_info();
  let mut campaign = Campaign::load(&campaign_info)?;
  campaign.record_donation(amount)?;

  if ctx.accounts.user.lamports() < amount {
    return Err(CampaignError::InsufficientFunds.into());
  }
  campaign.store(&campaign_info)?;

  // Transfer lamports from the donor into the campaign's custody
  system_program::transfer(
    CpiContext::new(
      ctx.accounts.system_program.to_account_info(),
      Transfer {
        from: ctx.accounts.user.to_account_info(),
        to: campaign_info.clone(),
      },
    ),
    amount,
  )?;

  msg!("Donated {} lamports to campaign {}", amount, campaign_info.key());
  emit!(DonationReceived {
    campaign: campaign_info.key(),
    donor: ctx.accounts.user.key(),
    amount,
    amount_donated: campaign.amount_donated,
  });

  Ok(())
}
