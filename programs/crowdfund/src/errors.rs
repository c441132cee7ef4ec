use anchor_lang::prelude::*;

#[error_code]
pub enum CampaignError {
    #[msg("Campaign address does not match its derivation")]
    AddressMismatch,
    #[msg("Campaign already exists")]
    AlreadyExists,
    #[msg("Campaign not found")]
    CampaignNotFound,
    #[msg("Insufficient funds to cover the amount")]
    InsufficientFunds,
    #[msg("Withdraw amount exceeds campaign balance")]
    InsufficientBalance,
    #[msg("Only the campaign owner can withdraw")]
    NotOwner,
    #[msg("Transaction rejected by the ledger")]
    TransactionRejected,
    #[msg("Amount can not be zero")]
    AmountZero,
    #[msg("Amount overflow")]
    AmountOverflow,
    #[msg("Campaign name too long")]
    NameTooLong,
    #[msg("Campaign description too long")]
    DescriptionTooLong,
}
