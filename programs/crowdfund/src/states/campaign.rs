use anchor_lang::prelude::*;
use std::mem;

use super::{DISCRIMINATOR_LEN, STRING_PREFIX_LEN};
use crate::{errors::CampaignError, pda::verify_campaign_address};

/// Seed tag shared with the browser client: `["CAMPAIGN_DEMO", owner]`.
pub const CAMPAIGN_PREFIX: &str = "CAMPAIGN_DEMO";

pub const MAX_NAME_LEN: usize = 64;
pub const MAX_DESCRIPTION_LEN: usize = 512;

#[account]
#[derive(Default, Debug, PartialEq, Eq)]
pub struct Campaign {
    pub owner: Pubkey,
    pub name: String,
    pub description: String,
    pub amount_donated: u64,
    pub bump: u8,
}

impl Campaign {
  const OWNER_LEN: usize = mem::size_of::<Pubkey>();
  const NAME_LEN: usize = STRING_PREFIX_LEN + MAX_NAME_LEN;
  const DESCRIPTION_LEN: usize = STRING_PREFIX_LEN + MAX_DESCRIPTION_LEN;
  const AMOUNT_DONATED_LEN: usize = mem::size_of::<u64>();
  const BUMP_LEN: usize = mem::size_of::<u8>();

  pub const LEN: usize = DISCRIMINATOR_LEN
    + Campaign::OWNER_LEN
    + Campaign::NAME_LEN
    + Campaign::DESCRIPTION_LEN
    + Campaign::AMOUNT_DONATED_LEN
    + Campaign::BUMP_LEN;

  pub fn new(owner: Pubkey, name: String, description: String, bump: u8) -> Result<Self> {
    if name.len() > MAX_NAME_LEN {
      return Err(CampaignError::NameTooLong.into());
    }
    if description.len() > MAX_DESCRIPTION_LEN {
      return Err(CampaignError::DescriptionTooLong.into());
    }

    Ok(Self {
      owner,
      name,
      description,
      amount_donated: 0,
      bump,
    })
  }

  /// Decodes the campaign stored at `address`, checking the owning program,
  /// the discriminator and the address derivation.
  pub fn decode(program_id: &Pubkey, address: &Pubkey, owner: &Pubkey, mut data: &[u8]) -> Result<Self> {
    if owner != program_id {
      return Err(CampaignError::CampaignNotFound.into());
    }
    let campaign = Campaign::try_deserialize(&mut data)
      .map_err(|_| CampaignError::CampaignNotFound)?;
    verify_campaign_address(program_id, &campaign.owner, address, campaign.bump)?;

    Ok(campaign)
  }

  pub fn load(info: &AccountInfo) -> Result<Self> {
    let data = info.try_borrow_data()?;
    Campaign::decode(&crate::ID, info.key, info.owner, &data[..])
  }

  pub fn store(&self, info: &AccountInfo) -> Result<()> {
    let mut data = info.try_borrow_mut_data()?;
    let mut writer: &mut [u8] = &mut data[..];
    self.try_serialize(&mut writer)
  }

  pub fn record_donation(&mut self, amount: u64) -> Result<()> {
    if amount == 0 {
      return Err(CampaignError::AmountZero.into());
    }

    self.amount_donated = self
      .amount_donated
      .checked_add(amount)
      .ok_or(CampaignError::AmountOverflow)?;

    Ok(())
  }

  /// Checks run in order: owner, non-zero amount, balance. `withdrawable` is
  /// the custody held above the rent reserve, see [`withdrawable_custody`].
  pub fn record_withdrawal(&mut self, user: &Pubkey, amount: u64, withdrawable: u64) -> Result<()> {
    if self.owner != *user {
      return Err(CampaignError::NotOwner.into());
    }
    if amount == 0 {
      return Err(CampaignError::AmountZero.into());
    }
    if amount > withdrawable {
      return Err(CampaignError::InsufficientBalance.into());
    }

    // custody can exceed the counter when lamports were sent outside `donate`
    self.amount_donated = self
      .amount_donated
      .checked_sub(amount)
      .ok_or(CampaignError::InsufficientBalance)?;

    Ok(())
  }
}

pub fn withdrawable_custody(lamports: u64, rent_reserve: u64) -> u64 {
  lamports.saturating_sub(rent_reserve)
}
