use anchor_lang::prelude::*;

use crate::{
  errors::CampaignError,
  events::FundsWithdrawn,
  states::{withdrawable_custody, Campaign},
};

#[derive(Accounts)]
pub struct Withdraw<'info> {
  #[account(mut)]
  /// CHECK: owner, discriminator and ["CAMPAIGN_DEMO", owner] address checked by Campaign::load
  pub campaign: UncheckedAccount<'info>,
  #[account(mut)]
  pub user: Signer<'info>,
}

pub fn withdraw_from_campaign(ctx: Context<Withdraw>, amount: u64) -> Result<()> {
  let campaign_info = ctx.accounts.campaign.to_account_info();
  let user_info = ctx.accounts.user.to_account_info();
  let mut campaign = Campaign::load(&campaign_info)?;

  let rent_reserve = Rent::get()?.minimum_balance(campaign_info.data_len());
  let withdrawable = withdrawable_custody(campaign_info.lamports(), rent_reserve);
  campaign.record_withdrawal(user_info.key, amount, withdrawable)?;
  campaign.store(&campaign_info)?;

  // The campaign is owned by this program, so lamports move without a CPI
  let campaign_lamports = campaign_info
    .lamports()
    .checked_sub(amount)
    .ok_or(CampaignError::InsufficientBalance)?;
  let user_lamports = user_info
    .lamports()
    .checked_add(amount)
    .ok_or(CampaignError::AmountOverflow)?;
  **campaign_info.try_borrow_mut_lamports()? = campaign_lamports;
  **user_info.try_borrow_mut_lamports()? = user_lamports;

  msg!("Withdrew {} lamports from campaign {}", amount, campaign_info.key());
  emit!(FundsWithdrawn {
    campaign: campaign_info.key(),
    owner: campaign.owner,
    amount,
    amount_donated: campaign.amount_donated,
  });

  Ok(())
}
