//! In-memory model of the ledger the program is deployed on.

use std::collections::BTreeMap;

use anchor_lang::{
    prelude::*,
    solana_program::{instruction::Instruction, system_program},
    Discriminator,
};

use crate::{
    errors::CampaignError,
    pda,
    query::{self, CampaignView},
    states::{withdrawable_custody, Campaign, DISCRIMINATOR_LEN},
};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AccountRecord {
    pub owner: Pubkey,
    pub lamports: u64,
    pub data: Vec<u8>,
}

impl AccountRecord {
    fn is_allocated(&self) -> bool {
        self.owner != system_program::ID || !self.data.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LedgerInstruction {
    Create {
        campaign: Pubkey,
        name: String,
        description: String,
    },
    Donate {
        campaign: Pubkey,
        amount: u64,
    },
    Withdraw {
        campaign: Pubkey,
        amount: u64,
    },
}

type Writes = Vec<(Pubkey, AccountRecord)>;

#[derive(Clone, Debug)]
pub struct Ledger {
    program_id: Pubkey,
    rent: Rent,
    accounts: BTreeMap<Pubkey, AccountRecord>,
}

impl Ledger {
    pub fn new(program_id: Pubkey) -> Self {
        Self {
            program_id,
            rent: Rent::default(),
            accounts: BTreeMap::new(),
        }
    }

    /// Credits a wallet, creating it as a system account if needed.
    pub fn fund(&mut self, wallet: &Pubkey, lamports: u64) {
        let record = self.accounts.entry(*wallet).or_insert_with(|| AccountRecord {
            owner: system_program::ID,
            ..AccountRecord::default()
        });
        record.lamports = record.lamports.saturating_add(lamports);
    }

    pub fn balance(&self, address: &Pubkey) -> u64 {
        self.accounts.get(address).map_or(0, |record| record.lamports)
    }

    pub fn account(&self, address: &Pubkey) -> Option<&AccountRecord> {
        self.accounts.get(address)
    }

    pub fn campaign(&self, address: &Pubkey) -> Result<Campaign> {
        self.load_campaign(address).map(|(_, campaign)| campaign)
    }

    /// Lamports a campaign account keeps to stay rent exempt.
    pub fn rent_reserve(&self) -> u64 {
        self.rent.minimum_balance(Campaign::LEN)
    }

    pub fn campaigns(&self) -> impl Iterator<Item = Result<CampaignView>> + '_ {
        query::campaigns(&self.program_id, self.accounts.iter())
    }

    pub fn apply(&mut self, signer: &Pubkey, instruction: LedgerInstruction) -> Result<()> {
        let payer = self.signer_account(signer)?;
        let writes = match instruction {
            LedgerInstruction::Create {
                campaign,
                name,
                description,
            } => self.create(signer, payer, campaign, name, description)?,
            LedgerInstruction::Donate { campaign, amount } => {
                self.donate(signer, payer, campaign, amount)?
            }
            LedgerInstruction::Withdraw { campaign, amount } => {
                self.withdraw(signer, payer, campaign, amount)?
            }
        };

        for (address, record) in writes {
            self.accounts.insert(address, record);
        }

        Ok(())
    }

    /// Decodes an instruction built for this program and applies it. Account
    /// metas are checked the way the program's account validation checks them.
    pub fn process(&mut self, signer: &Pubkey, instruction: &Instruction) -> Result<()> {
        if instruction.program_id != self.program_id {
            return Err(CampaignError::TransactionRejected.into());
        }

        let accounts = &instruction.accounts;
        let campaign = accounts
            .first()
            .filter(|meta| meta.is_writable)
            .ok_or(CampaignError::TransactionRejected)?
            .pubkey;
        accounts
            .get(1)
            .filter(|meta| meta.is_signer && meta.is_writable && meta.pubkey == *signer)
            .ok_or(CampaignError::TransactionRejected)?;

        let decoded = decode_instruction(campaign, &instruction.data)?;
        if !matches!(decoded, LedgerInstruction::Withdraw { .. }) {
            accounts
                .get(2)
                .filter(|meta| meta.pubkey == system_program::ID)
                .ok_or(CampaignError::TransactionRejected)?;
        }

        self.apply(signer, decoded)
    }

    fn signer_account(&self, signer: &Pubkey) -> Result<AccountRecord> {
        match self.accounts.get(signer) {
            Some(record) if !record.is_allocated() => Ok(record.clone()),
            _ => Err(CampaignError::TransactionRejected.into()),
        }
    }

    fn load_campaign(&self, address: &Pubkey) -> Result<(AccountRecord, Campaign)> {
        let record = self
            .accounts
            .get(address)
            .ok_or(CampaignError::CampaignNotFound)?;
        let campaign = Campaign::decode(&self.program_id, address, &record.owner, &record.data)?;

        Ok((record.clone(), campaign))
    }

    fn create(
        &self,
        owner: &Pubkey,
        mut payer: AccountRecord,
        address: Pubkey,
        name: String,
        description: String,
    ) -> Result<Writes> {
        let (expected, bump) = pda::find_campaign_address_for(&self.program_id, owner)?;
        if address != expected {
            return Err(CampaignError::AddressMismatch.into());
        }

        // a derived address may already hold lamports sent to it before creation
        let mut record = self.accounts.get(&address).cloned().unwrap_or_default();
        if record.is_allocated() {
            return Err(CampaignError::AlreadyExists.into());
        }

        let campaign = Campaign::new(*owner, name, description, bump)?;

        let top_up = self.rent_reserve().saturating_sub(record.lamports);
        payer.lamports = payer
            .lamports
            .checked_sub(top_up)
            .ok_or(CampaignError::InsufficientFunds)?;
        record.lamports = record
            .lamports
            .checked_add(top_up)
            .ok_or(CampaignError::AmountOverflow)?;
        record.owner = self.program_id;
        record.data = vec![0; Campaign::LEN];
        campaign.try_serialize(&mut record.data.as_mut_slice())?;

        Ok(vec![(*owner, payer), (address, record)])
    }

    fn donate(
        &self,
        donor: &Pubkey,
        mut payer: AccountRecord,
        address: Pubkey,
        amount: u64,
    ) -> Result<Writes> {
        let (mut record, mut campaign) = self.load_campaign(&address)?;
        campaign.record_donation(amount)?;

        payer.lamports = payer
            .lamports
            .checked_sub(amount)
            .ok_or(CampaignError::InsufficientFunds)?;
        record.lamports = record
            .lamports
            .checked_add(amount)
            .ok_or(CampaignError::AmountOverflow)?;
        campaign.try_serialize(&mut record.data.as_mut_slice())?;

        Ok(vec![(*donor, payer), (address, record)])
    }

    fn withdraw(
        &self,
        user: &Pubkey,
        mut payer: AccountRecord,
        address: Pubkey,
        amount: u64,
    ) -> Result<Writes> {
        let (mut record, mut campaign) = self.load_campaign(&address)?;
        let rent_reserve = self.rent.minimum_balance(record.data.len());
        let withdrawable = withdrawable_custody(record.lamports, rent_reserve);
        campaign.record_withdrawal(user, amount, withdrawable)?;

        record.lamports = record
            .lamports
            .checked_sub(amount)
            .ok_or(CampaignError::InsufficientBalance)?;
        payer.lamports = payer
            .lamports
            .checked_add(amount)
            .ok_or(CampaignError::AmountOverflow)?;
        campaign.try_serialize(&mut record.data.as_mut_slice())?;

        Ok(vec![(*user, payer), (address, record)])
    }
}

fn decode_instruction(campaign: Pubkey, data: &[u8]) -> Result<LedgerInstruction> {
    if data.len() < DISCRIMINATOR_LEN {
        return Err(CampaignError::TransactionRejected.into());
    }
    let (discriminator, mut args) = data.split_at(DISCRIMINATOR_LEN);

    let instruction = if discriminator == &crate::instruction::Create::DISCRIMINATOR[..] {
        let args = crate::instruction::Create::deserialize(&mut args)
            .map_err(|_| CampaignError::TransactionRejected)?;
        LedgerInstruction::Create {
            campaign,
            name: args.name,
            description: args.description,
        }
    } else if discriminator == &crate::instruction::Donate::DISCRIMINATOR[..] {
        let args = crate::instruction::Donate::deserialize(&mut args)
            .map_err(|_| CampaignError::TransactionRejected)?;
        LedgerInstruction::Donate {
            campaign,
            amount: args.amount,
        }
    } else if discriminator == &crate::instruction::Withdraw::DISCRIMINATOR[..] {
        let args = crate::instruction::Withdraw::deserialize(&mut args)
            .map_err(|_| CampaignError::TransactionRejected)?;
        LedgerInstruction::Withdraw {
            campaign,
            amount: args.amount,
        }
    } else {
        return Err(CampaignError::TransactionRejected.into());
    };

    Ok(instruction)
}
