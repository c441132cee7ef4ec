use anchor_lang::AccountDeserialize;
use crowdfund::{
    client::{create_campaign_ix, donate_ix, withdraw_ix},
    errors::CampaignError,
    pda::find_campaign_address,
    states::Campaign,
};
use solana_program_test::{processor, ProgramTest, ProgramTestContext};
use solana_sdk::{
    account::Account,
    instruction::{Instruction, InstructionError},
    pubkey::Pubkey,
    signature::{Keypair, Signer},
    transaction::{Transaction, TransactionError},
};

const WALLET: u64 = 10_000_000_000;

// Anchor's generated `entry` ties the accounts slice lifetime to the
// `AccountInfo` lifetime, which `processor!` cannot accept directly.
fn entry(
    program_id: &Pubkey,
    accounts: &[anchor_lang::prelude::AccountInfo],
    data: &[u8],
) -> anchor_lang::solana_program::entrypoint::ProgramResult {
    let accounts = Box::leak(Box::new(accounts.to_vec()));
    crowdfund::entry(program_id, accounts, data)
}

fn program_test(wallets: &[&Keypair]) -> ProgramTest {
    let mut program_test =
        ProgramTest::new("crowdfund", crowdfund::ID, processor!(entry));
    for wallet in wallets {
        program_test.add_account(
            wallet.pubkey(),
            Account {
                lamports: WALLET,
                ..Account::default()
            },
        );
    }
    program_test
}

async fn send(
    ctx: &mut ProgramTestContext,
    signer: &Keypair,
    ix: Instruction,
) -> Result<(), TransactionError> {
    let blockhash = ctx.get_new_latest_blockhash().await.unwrap();
    let tx = Transaction::new_signed_with_payer(
        &[ix],
        Some(&ctx.payer.pubkey()),
        &[&ctx.payer, signer],
        blockhash,
    );
    ctx.banks_client
        .process_transaction(tx)
        .await
        .map_err(|err| err.unwrap())
}

fn rejected(err: CampaignError) -> TransactionError {
    TransactionError::InstructionError(0, InstructionError::Custom(u32::from(err)))
}

async fn balance(ctx: &mut ProgramTestContext, address: &Pubkey) -> u64 {
    ctx.banks_client.get_balance(*address).await.unwrap()
}

async fn campaign(ctx: &mut ProgramTestContext, address: &Pubkey) -> Campaign {
    let account = ctx.banks_client.get_account(*address).await.unwrap().unwrap();
    assert_eq!(account.owner, crowdfund::ID);
    Campaign::try_deserialize(&mut account.data.as_slice()).unwrap()
}

async fn rent_reserve(ctx: &mut ProgramTestContext) -> u64 {
    let rent = ctx.banks_client.get_rent().await.unwrap();
    rent.minimum_balance(Campaign::LEN)
}

#[tokio::test]
async fn art_fund_through_entrypoint() {
    let alice = Keypair::new();
    let bob = Keypair::new();
    let carol = Keypair::new();
    let mut ctx = program_test(&[&alice, &bob, &carol]).start_with_context().await;
    let reserve = rent_reserve(&mut ctx).await;

    let (address, create) =
        create_campaign_ix(&alice.pubkey(), "Art Fund".to_string(), "buy paint".to_string())
            .unwrap();
    send(&mut ctx, &alice, create).await.unwrap();
    assert_eq!(address, find_campaign_address(&alice.pubkey()).unwrap().0);
    assert_eq!(balance(&mut ctx, &address).await, reserve);
    assert_eq!(balance(&mut ctx, &alice.pubkey()).await, WALLET - reserve);

    let stored = campaign(&mut ctx, &address).await;
    assert_eq!(stored.owner, alice.pubkey());
    assert_eq!(stored.name, "Art Fund");
    assert_eq!(stored.description, "buy paint");
    assert_eq!(stored.amount_donated, 0);

    send(&mut ctx, &bob, donate_ix(&bob.pubkey(), &address, 500))
        .await
        .unwrap();
    send(&mut ctx, &carol, donate_ix(&carol.pubkey(), &address, 300))
        .await
        .unwrap();
    assert_eq!(campaign(&mut ctx, &address).await.amount_donated, 800);
    assert_eq!(balance(&mut ctx, &address).await, reserve + 800);
    assert_eq!(balance(&mut ctx, &bob.pubkey()).await, WALLET - 500);
    assert_eq!(balance(&mut ctx, &carol.pubkey()).await, WALLET - 300);

    let err = send(&mut ctx, &bob, withdraw_ix(&bob.pubkey(), &address, 100))
        .await
        .unwrap_err();
    assert_eq!(err, rejected(CampaignError::NotOwner));

    send(&mut ctx, &alice, withdraw_ix(&alice.pubkey(), &address, 800))
        .await
        .unwrap();
    assert_eq!(campaign(&mut ctx, &address).await.amount_donated, 0);
    assert_eq!(balance(&mut ctx, &address).await, reserve);
    assert_eq!(balance(&mut ctx, &alice.pubkey()).await, WALLET - reserve + 800);

    let err = send(&mut ctx, &alice, withdraw_ix(&alice.pubkey(), &address, 1))
        .await
        .unwrap_err();
    assert_eq!(err, rejected(CampaignError::InsufficientBalance));
    assert_eq!(balance(&mut ctx, &address).await, reserve);
}

#[tokio::test]
async fn second_create_reports_already_exists() {
    let owner = Keypair::new();
    let mut ctx = program_test(&[&owner]).start_with_context().await;

    let (address, create) =
        create_campaign_ix(&owner.pubkey(), "first".to_string(), String::new()).unwrap();
    send(&mut ctx, &owner, create).await.unwrap();

    let (_, again) =
        create_campaign_ix(&owner.pubkey(), "second".to_string(), String::new()).unwrap();
    let err = send(&mut ctx, &owner, again).await.unwrap_err();
    assert_eq!(err, rejected(CampaignError::AlreadyExists));
    assert_eq!(campaign(&mut ctx, &address).await.name, "first");
}

#[tokio::test]
async fn create_at_foreign_address_is_rejected() {
    let owner = Keypair::new();
    let other = Keypair::new();
    let mut ctx = program_test(&[&owner]).start_with_context().await;

    let (_, mut create) =
        create_campaign_ix(&owner.pubkey(), "Art Fund".to_string(), String::new()).unwrap();
    let (foreign, _) = find_campaign_address(&other.pubkey()).unwrap();
    create.accounts[0].pubkey = foreign;

    let err = send(&mut ctx, &owner, create).await.unwrap_err();
    assert_eq!(err, rejected(CampaignError::AddressMismatch));
    assert_eq!(balance(&mut ctx, &foreign).await, 0);
}

#[tokio::test]
async fn create_keeps_lamports_already_at_address() {
    let owner = Keypair::new();
    let (address, _) = find_campaign_address(&owner.pubkey()).unwrap();
    let mut program_test = program_test(&[&owner]);
    program_test.add_account(
        address,
        Account {
            lamports: 1_000_000,
            ..Account::default()
        },
    );
    let mut ctx = program_test.start_with_context().await;
    let reserve = rent_reserve(&mut ctx).await;

    let (_, create) =
        create_campaign_ix(&owner.pubkey(), "Art Fund".to_string(), String::new()).unwrap();
    send(&mut ctx, &owner, create).await.unwrap();

    assert_eq!(balance(&mut ctx, &address).await, reserve);
    assert_eq!(
        balance(&mut ctx, &owner.pubkey()).await,
        WALLET - (reserve - 1_000_000)
    );
    assert_eq!(campaign(&mut ctx, &address).await.owner, owner.pubkey());
}

#[tokio::test]
async fn donate_checks_campaign_and_amount() {
    let owner = Keypair::new();
    let donor = Keypair::new();
    let mut ctx = program_test(&[&owner, &donor]).start_with_context().await;
    let (address, _) = find_campaign_address(&owner.pubkey()).unwrap();

    let err = send(&mut ctx, &donor, donate_ix(&donor.pubkey(), &address, 100))
        .await
        .unwrap_err();
    assert_eq!(err, rejected(CampaignError::CampaignNotFound));

    let (_, create) =
        create_campaign_ix(&owner.pubkey(), "Art Fund".to_string(), String::new()).unwrap();
    send(&mut ctx, &owner, create).await.unwrap();

    let err = send(&mut ctx, &donor, donate_ix(&donor.pubkey(), &address, 0))
        .await
        .unwrap_err();
    assert_eq!(err, rejected(CampaignError::AmountZero));

    let err = send(&mut ctx, &donor, donate_ix(&donor.pubkey(), &address, WALLET + 1))
        .await
        .unwrap_err();
    assert_eq!(err, rejected(CampaignError::InsufficientFunds));

    assert_eq!(campaign(&mut ctx, &address).await.amount_donated, 0);
    assert_eq!(balance(&mut ctx, &donor.pubkey()).await, WALLET);
}
