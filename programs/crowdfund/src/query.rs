//! Read side: enumerate campaign accounts owned by the program.

use anchor_lang::{prelude::*, Discriminator};

use crate::{ledger::AccountRecord, states::Campaign};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CampaignView {
    pub address: Pubkey,
    pub campaign: Campaign,
}

/// Lazily decodes every campaign among `accounts`. Records owned by other
/// programs, or carrying another discriminator, are skipped; a campaign whose
/// data fails to decode is yielded as an error. Order follows `accounts`.
pub fn campaigns<'a, I>(
    program_id: &'a Pubkey,
    accounts: I,
) -> impl Iterator<Item = Result<CampaignView>> + 'a
where
    I: IntoIterator<Item = (&'a Pubkey, &'a AccountRecord)>,
    I::IntoIter: 'a,
{
    accounts
        .into_iter()
        .filter(move |(_, record)| {
            record.owner == *program_id && record.data.starts_with(&Campaign::DISCRIMINATOR)
        })
        .map(|(address, record)| {
            let campaign = Campaign::try_deserialize(&mut record.data.as_slice())?;
            Ok(CampaignView {
                address: *address,
                campaign,
            })
        })
}

/// A captured list of campaigns for display. May be stale as soon as it is taken.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CampaignSnapshot {
    campaigns: Vec<CampaignView>,
}

impl CampaignSnapshot {
    pub fn capture<I>(views: I) -> Result<Self>
    where
        I: IntoIterator<Item = Result<CampaignView>>,
    {
        Ok(Self {
            campaigns: views.into_iter().collect::<Result<Vec<_>>>()?,
        })
    }

    /// Replaces the contents; on error the previous contents are kept.
    pub fn refresh<I>(&mut self, views: I) -> Result<()>
    where
        I: IntoIterator<Item = Result<CampaignView>>,
    {
        *self = Self::capture(views)?;
        Ok(())
    }

    pub fn get(&self, address: &Pubkey) -> Option<&CampaignView> {
        self.campaigns.iter().find(|view| view.address == *address)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CampaignView> {
        self.campaigns.iter()
    }

    pub fn len(&self) -> usize {
        self.campaigns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.campaigns.is_empty()
    }
}
