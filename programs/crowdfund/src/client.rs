use anchor_lang::{
    prelude::*,
    solana_program::{instruction::Instruction, system_program},
    InstructionData,
};

use crate::pda::find_campaign_address;

/// Builds `create` for `owner`, returning the derived campaign address with it.
pub fn create_campaign_ix(
    owner: &Pubkey,
    name: String,
    description: String,
) -> Result<(Pubkey, Instruction)> {
    let (campaign, _) = find_campaign_address(owner)?;
    let instruction = Instruction {
        program_id: crate::ID,
        accounts: crate::accounts::Create {
            campaign,
            user: *owner,
            system_program: system_program::ID,
        }
        .to_account_metas(None),
        data: crate::instruction::Create { name, description }.data(),
    };

    Ok((campaign, instruction))
}

pub fn donate_ix(user: &Pubkey, campaign: &Pubkey, amount: u64) -> Instruction {
    Instruction {
        program_id: crate::ID,
        accounts: crate::accounts::Donate {
            campaign: *campaign,
            user: *user,
            system_program: system_program::ID,
        }
        .to_account_metas(None),
        data: crate::instruction::Donate { amount }.data(),
    }
}

pub fn withdraw_ix(user: &Pubkey, campaign: &Pubkey, amount: u64) -> Instruction {
    Instruction {
        program_id: crate::ID,
        accounts: crate::accounts::Withdraw {
            campaign: *campaign,
            user: *user,
        }
        .to_account_metas(None),
        data: crate::instruction::Withdraw { amount }.data(),
    }
}
