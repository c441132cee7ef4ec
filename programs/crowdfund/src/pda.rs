use anchor_lang::prelude::*;

use crate::{errors::CampaignError, states::CAMPAIGN_PREFIX};

/// Returns the campaign address for `owner` and the bump that proves it.
pub fn find_campaign_address(owner: &Pubkey) -> Result<(Pubkey, u8)> {
    find_campaign_address_for(&crate::ID, owner)
}

pub fn find_campaign_address_for(program_id: &Pubkey, owner: &Pubkey) -> Result<(Pubkey, u8)> {
    Pubkey::try_find_program_address(&[CAMPAIGN_PREFIX.as_bytes(), owner.as_ref()], program_id)
        .ok_or_else(|| CampaignError::AddressMismatch.into())
}

/// Re-derives the address from `owner` and a known `bump`.
pub fn verify_campaign_address(
    program_id: &Pubkey,
    owner: &Pubkey,
    address: &Pubkey,
    bump: u8,
) -> Result<()> {
    let derived = Pubkey::create_program_address(
        &[CAMPAIGN_PREFIX.as_bytes(), owner.as_ref(), &[bump]],
        program_id,
    )
    .map_err(|_| CampaignError::AddressMismatch)?;

    if derived != *address {
        return Err(CampaignError::AddressMismatch.into());
    }

    Ok(())
}
