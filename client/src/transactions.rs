use std::time::Duration;

use anyhow::Context;
use colored::Colorize;
use record_interface::instructions::InstructionTag;
use solana_address::Address;
use solana_client::{
    client_error::{
        ClientError,
        ClientErrorKind,
    },
    nonblocking::rpc_client::RpcClient,
    rpc_config::RpcSendTransactionConfig,
    rpc_request::{
        RpcError::RpcResponseError,
        RpcResponseErrorData,
    },
    rpc_response::RpcSimulateTransactionResult,
};
use solana_commitment_config::{
    CommitmentConfig,
    CommitmentLevel,
};
use solana_compute_budget_interface::ComputeBudgetInstruction;
use solana_instruction::Instruction;
use solana_instruction_error::InstructionError;
use solana_sdk::{
    message::Message,
    signature::{
        Keypair,
        Signature,
        Signer,
    },
    transaction::Transaction,
};
use solana_transaction_error::TransactionError;

use crate::{
    config::BindingsConfig,
    logs::{
        log_error,
        log_info,
        log_success,
        log_warning,
        LogColor,
    },
};

pub const DEFAULT_FUND_AMOUNT: u64 = 10_000_000_000;

const CONFIRM_ATTEMPTS: usize = 30;
const CONFIRM_INTERVAL: Duration = Duration::from_millis(500);

/// Airdrops [`DEFAULT_FUND_AMOUNT`] lamports to `keypair`, or to a fresh keypair if `None`.
pub async fn fund_account(rpc: &RpcClient, keypair: Option<Keypair>) -> anyhow::Result<Keypair> {
    let payer = keypair.unwrap_or_else(Keypair::new);

    let airdrop_signature = rpc
        .request_airdrop(&payer.pubkey(), DEFAULT_FUND_AMOUNT)
        .await
        .context("Failed to request airdrop")?;

    let commitment = rpc.commitment();
    for _ in 0..CONFIRM_ATTEMPTS {
        let confirmed = rpc
            .confirm_transaction_with_commitment(&airdrop_signature, commitment)
            .await
            .context("Couldn't confirm airdrop")?
            .value;
        if confirmed {
            return Ok(payer);
        }
        tokio::time::sleep(CONFIRM_INTERVAL).await;
    }

    Err(anyhow::anyhow!(
        "Airdrop to {} wasn't confirmed: {airdrop_signature}",
        payer.pubkey()
    ))
}

pub struct SendTransactionConfig {
    pub compute_budget: Option<u32>,
    pub debug_logs: Option<bool>,
    pub skip_preflight: bool,
    pub preflight_commitment: Option<CommitmentLevel>,
    pub confirm_commitment: CommitmentConfig,
    /// The record program's id, used to name failing instructions in error logs.
    pub program_id: Option<Address>,
}

impl Default for SendTransactionConfig {
    fn default() -> Self {
        SendTransactionConfig {
            compute_budget: Default::default(),
            debug_logs: Some(true),
            skip_preflight: false,
            preflight_commitment: None,
            confirm_commitment: CommitmentConfig::confirmed(),
            program_id: None,
        }
    }
}

impl From<&BindingsConfig> for SendTransactionConfig {
    fn from(config: &BindingsConfig) -> Self {
        SendTransactionConfig {
            skip_preflight: config.skip_preflight,
            preflight_commitment: Some(config.commitment.level()),
            confirm_commitment: config.commitment.config(),
            program_id: Some(*config.active_program_id()),
            ..Default::default()
        }
    }
}

pub async fn send_transaction(
    rpc: &RpcClient,
    payer: &Keypair,
    signers: &[&Keypair],
    instructions: &[Instruction],
) -> anyhow::Result<Signature> {
    send_transaction_with_config(rpc, payer, signers, instructions, None).await
}

/// Signs with `payer` and `signers`, then sends and confirms with the settings in `config`.
pub async fn sign_and_send_instructions(
    rpc: &RpcClient,
    config: &BindingsConfig,
    payer: &Keypair,
    signers: &[&Keypair],
    instructions: &[Instruction],
) -> anyhow::Result<Signature> {
    send_transaction_with_config(rpc, payer, signers, instructions, Some(config.into())).await
}

pub async fn send_transaction_with_config(
    rpc: &RpcClient,
    payer: &Keypair,
    signers: &[&Keypair],
    instructions: &[Instruction],
    config: Option<SendTransactionConfig>,
) -> anyhow::Result<Signature> {
    let SendTransactionConfig {
        compute_budget,
        debug_logs,
        skip_preflight,
        preflight_commitment,
        confirm_commitment,
        program_id,
    } = config.unwrap_or_default();

    let bh = rpc
        .get_latest_blockhash()
        .await
        .context("Couldn't fetch the latest blockhash")?;

    let msg = Message::new(
        &[
            compute_budget.map_or(vec![], |budget| {
                vec![
                    ComputeBudgetInstruction::set_compute_unit_limit(budget),
                    ComputeBudgetInstruction::set_compute_unit_price(1),
                ]
            }),
            instructions.to_vec(),
        ]
        .concat(),
        Some(&payer.pubkey()),
    );
    // Compute budget instructions shift the caller's instruction indices.
    let index_offset = msg.instructions.len() - instructions.len();

    let all_signers: Vec<&Keypair> = std::iter::once(payer)
        .chain(signers.iter().copied())
        .collect();
    let mut tx = Transaction::new_unsigned(msg);
    tx.try_sign(&all_signers, bh)
        .context("Couldn't sign transaction")?;

    let sent = rpc
        .send_transaction_with_config(
            &tx,
            RpcSendTransactionConfig {
                skip_preflight,
                preflight_commitment,
                ..Default::default()
            },
        )
        .await;

    let sig = match sent {
        Ok(sig) => sig,
        Err(error) => {
            if let Some((idx, ixn_error)) = preflight_instruction_error(&error) {
                log_instruction_error(idx, &ixn_error, instructions, index_offset, program_id);
            }
            log_info("Payer", payer.pubkey());
            return Err(error).context("Failed transaction submission");
        }
    };

    if let Err(error) = confirm_signature(rpc, &sig, confirm_commitment).await {
        if let Some(TransactionError::InstructionError(idx, ixn_error)) =
            error.downcast_ref::<TransactionError>()
        {
            log_instruction_error(*idx, ixn_error, instructions, index_offset, program_id);
        }
        log_info("Payer", payer.pubkey());
        return Err(error).context("Failed transaction confirmation");
    }

    if matches!(debug_logs, Some(true)) {
        let sender_info = format!("{}: {}", "sender".color(LogColor::Gray), payer.pubkey());
        log_success("Signature", format!("{sig}\n{sender_info}"));
    }

    Ok(sig)
}

/// Polls the signature status until it reaches `commitment`.
///
/// A transaction that landed but failed is returned as its [`TransactionError`].
pub async fn confirm_signature(
    rpc: &RpcClient,
    sig: &Signature,
    commitment: CommitmentConfig,
) -> anyhow::Result<()> {
    for _ in 0..CONFIRM_ATTEMPTS {
        let status = rpc
            .get_signature_status_with_commitment(sig, commitment)
            .await
            .context("Couldn't fetch signature status")?;
        match status {
            Some(Ok(())) => return Ok(()),
            Some(Err(err)) => return Err(err.into()),
            None => tokio::time::sleep(CONFIRM_INTERVAL).await,
        }
    }

    Err(anyhow::anyhow!(
        "Transaction {sig} wasn't confirmed at {:?}",
        commitment.commitment
    ))
}

fn preflight_instruction_error(error: &ClientError) -> Option<(u8, InstructionError)> {
    if let ClientErrorKind::RpcError(RpcResponseError {
        data:
            RpcResponseErrorData::SendTransactionPreflightFailure(RpcSimulateTransactionResult {
                err: Some(ui_err),
                ..
            }),
        ..
    }) = error.kind()
    {
        if let TransactionError::InstructionError(idx, ixn_error) = ui_err.clone().into() {
            return Some((idx, ixn_error));
        }
    }
    None
}

/// Logs a failed instruction. Instructions sent to `program_id` are named by their tag.
///
/// `ixn_idx` is the index in the sent message; `index_offset` is the number of instructions
/// prepended ahead of `instructions`.
pub fn log_instruction_error(
    ixn_idx: u8,
    ixn_error: &InstructionError,
    instructions: &[Instruction],
    index_offset: usize,
    program_id: Option<Address>,
) {
    let Some(instruction) = (ixn_idx as usize)
        .checked_sub(index_offset)
        .and_then(|i| instructions.get(i))
    else {
        log_error("Instruction error", format!("#{ixn_idx}: {ixn_error}"));
        return;
    };

    let is_record_program = program_id.is_some_and(|id| id == instruction.program_id);
    let tag = instruction
        .data
        .first()
        .and_then(|tag| InstructionTag::try_from(*tag).ok());

    match (is_record_program, tag) {
        (true, Some(tag)) => log_error("Record program error", format!("({tag}, {ixn_error})")),
        (true, None) => log_warning("Record program error", format!("(unknown tag, {ixn_error})")),
        _ => log_error(
            "Instruction error",
            format!("#{ixn_idx} ({}): {ixn_error}", instruction.program_id),
        ),
    }
}
