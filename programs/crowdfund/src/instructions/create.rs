use anchor_lang::prelude::*;
use anchor_lang::system_program::{self, Allocate, Assign, CreateAccount, Transfer};

use crate::{
  errors::CampaignError,
  events::CampaignCreated,
  pda::find_campaign_address,
  states::{Campaign, CAMPAIGN_PREFIX},
};

#[derive(Accounts)]
pub struct Create<'info> {
  #[account(mut)]
  /// CHECK: pda account ["CAMPAIGN_DEMO", user], verified and allocated by the handler
  pub campaign: UncheckedAccount<'info>,
  #[account(mut)]
  pub user: Signer<'info>,
  pub system_program: Program<'info, System>,
}

pub fn create_campaign(ctx: Context<Create>, name: String, description: String) -> Result<()> {
  let owner = ctx.accounts.user.key();
  let campaign_info = ctx.accounts.campaign.to_account_info();
  let user_info = ctx.accounts.user.to_account_info();
  let system_program_info = ctx.accounts.system_program.to_account_info();

  let (expected, bump) = find_campaign_address(&owner)?;
  if campaign_info.key() != expected {
    return Err(CampaignError::AddressMismatch.into());
  }
  if campaign_info.owner != &System::id() || !campaign_info.data_is_empty() {
    return Err(CampaignError::AlreadyExists.into());
  }

  let campaign = Campaign::new(owner, name, description, bump)?;

  let required = Rent::get()?.minimum_balance(Campaign::LEN);
  let top_up = required.saturating_sub(campaign_info.lamports());
  if user_info.lamports() < top_up {
    return Err(CampaignError::InsufficientFunds.into());
  }

  let seeds = &[
    CAMPAIGN_PREFIX.as_bytes(),
    owner.as_ref(),
    &[bump],
  ];
  let signer = &[&seeds[..]];

  if campaign_info.lamports() == 0 {
    system_program::create_account(
      CpiContext::new_with_signer(
        system_program_info,
        CreateAccount {
          from: user_info,
          to: campaign_info.clone(),
        },
        signer,
      ),
      required,
      Campaign::LEN as u64,
      &crate::ID,
    )?;
  } else {
    // lamports sent to the address before creation stay in custody
    if top_up > 0 {
      system_program::transfer(
        CpiContext::new(
          system_program_info.clone(),
          Transfer {
            from: user_info,
            to: campaign_info.clone(),
          },
        ),
        top_up,
      )?;
    }
    system_program::allocate(
      CpiContext::new_with_signer(
        system_program_info.clone(),
        Allocate {
          account_to_allocate: campaign_info.clone(),
        },
        signer,
      ),
      Campaign::LEN as u64,
    )?;
    system_program::assign(
      CpiContext::new_with_signer(
        system_program_info,
        Assign {
          account_to_assign: campaign_info.clone(),
        },
        signer,
      ),
      &crate::ID,
    )?;
  }

  campaign.store(&campaign_info)?;

  msg!("Created campaign {} owned by {}", campaign_info.key(), owner);
  emit!(CampaignCreated {
    campaign: campaign_info.key(),
    owner,
    name: campaign.name,
  });

  Ok(())
}
