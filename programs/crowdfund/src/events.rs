use anchor_lang::prelude::*;

#[event]
pub struct CampaignCreated {
    pub campaign: Pubkey,
    pub owner: Pubkey,
    pub name: String,
}

#[event]
pub struct DonationReceived {
    pub campaign: Pubkey,
    pub donor: Pubkey,
    pub amount: u64,
    pub amount_donated: u64,
}

#[event]
pub struct FundsWithdrawn {
    pub campaign: Pubkey,
    pub owner: Pubkey,
    pub amount: u64,
    pub amount_donated: u64,
}
