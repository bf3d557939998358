use record_client::{
    config::{
        BindingsConfig,
        Cluster,
        Commitment,
    },
    pda::find_linked_state_address,
    transactions::{
        log_instruction_error,
        SendTransactionConfig,
    },
};
use record_interface::{
    instructions::{
        build_call,
        CreateRecord,
        InstructionDescriptor,
        InstructionTag,
        WithdrawTokens,
    },
    layout::FieldValue,
    AccountReference,
    CodecError,
};
use solana_address::Address;
use solana_commitment_config::CommitmentLevel;
use solana_instruction::AccountMeta;
use solana_instruction_error::InstructionError;

const PROGRAM_ID: Address = Address::new_from_array([42; 32]);

#[test]
fn create_record_call() -> anyhow::Result<()> {
    let fee_payer = Address::new_from_array([1; 32]);
    let linked = Address::new_from_array([2; 32]);
    let derived = find_linked_state_address(&linked, &PROGRAM_ID);

    let ixn = CreateRecord {
        fee_payer,
        linked_account: linked,
        owner: Address::new_from_array([3; 32]),
        mint: Address::new_from_array([4; 32]),
        record: derived.address,
        nonce: derived.nonce,
        ..Default::default()
    }
    .instruction(&PROGRAM_ID)?;

    assert_eq!(ixn.program_id, PROGRAM_ID);
    assert_eq!(ixn.data, vec![1, derived.nonce]);
    assert_eq!(ixn.accounts[1], AccountMeta::new(fee_payer, true));
    assert_eq!(ixn.accounts[2], AccountMeta::new_readonly(linked, false));
    assert_eq!(ixn.accounts[5], AccountMeta::new(derived.address, false));

    Ok(())
}

#[test]
fn build_call_keeps_accounts_verbatim() -> anyhow::Result<()> {
    let descriptor = InstructionDescriptor::new(InstructionTag::WithdrawTokens)
        .with("amount", FieldValue::U64(0x0102));
    // Signer and writable flags are passed through without validation.
    let accounts = [
        AccountReference::writable_signer(Address::new_from_array([1; 32])),
        AccountReference::readonly(Address::new_from_array([2; 32])),
    ];

    let ixn = build_call(&descriptor, &PROGRAM_ID, accounts)?;
    assert_eq!(ixn.data, [2, 0x02, 0x01, 0, 0, 0, 0, 0, 0]);
    assert_eq!(ixn.accounts.len(), 2);
    assert!(ixn.accounts[0].is_signer && ixn.accounts[0].is_writable);
    assert!(!ixn.accounts[1].is_signer && !ixn.accounts[1].is_writable);

    let missing = InstructionDescriptor::new(InstructionTag::WithdrawTokens);
    assert_eq!(
        build_call(&missing, &PROGRAM_ID, accounts),
        Err(CodecError::MissingField("amount"))
    );

    Ok(())
}

#[test]
fn withdraw_with_fee_account() -> anyhow::Result<()> {
    let fee_account = Address::new_from_array([9; 32]);
    let withdraw = |fee_account| WithdrawTokens {
        spl_token_program: spl_token_interface::ID,
        owner: Address::new_from_array([1; 32]),
        record: Address::new_from_array([2; 32]),
        vault: Address::new_from_array([3; 32]),
        destination: Address::new_from_array([4; 32]),
        fee_account,
        amount: 5,
    };

    assert_eq!(withdraw(None).instruction(&PROGRAM_ID)?.accounts.len(), 5);
    let with_fee = withdraw(Some(fee_account)).instruction(&PROGRAM_ID)?;
    assert_eq!(with_fee.accounts.len(), 6);
    assert_eq!(with_fee.accounts[5], AccountMeta::new(fee_account, false));

    Ok(())
}

#[test]
fn send_config_from_bindings() {
    let devnet = Address::new_from_array([7; 32]);
    let bindings = BindingsConfig {
        devnet_program_id: Some(devnet),
        cluster: Cluster::Devnet,
        commitment: Commitment::Finalized,
        skip_preflight: true,
        ..BindingsConfig::new(PROGRAM_ID)
    };

    let config = SendTransactionConfig::from(&bindings);
    assert!(config.skip_preflight);
    assert_eq!(config.preflight_commitment, Some(CommitmentLevel::Finalized));
    assert_eq!(config.confirm_commitment.commitment, CommitmentLevel::Finalized);
    assert_eq!(config.program_id, Some(devnet));
}

#[test]
fn log_errors_for_any_instruction_index() {
    let ixn = CreateRecord::default().instruction(&PROGRAM_ID).unwrap();
    let instructions = [ixn];
    let error = InstructionError::Custom(3);

    log_instruction_error(0, &error, &instructions, 0, Some(PROGRAM_ID));
    log_instruction_error(2, &error, &instructions, 2, None);
    // Out of range and compute budget indices.
    log_instruction_error(5, &error, &instructions, 0, Some(PROGRAM_ID));
    log_instruction_error(0, &error, &instructions, 2, Some(PROGRAM_ID));
}
