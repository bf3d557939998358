use record_client::{
    e2e_helpers::E2e,
    logs::{
        log_info,
        log_success,
    },
    BindingsConfig,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let e2e = E2e::new(BindingsConfig::from_env()?).await?;

    match e2e.retrieve_seeded().await {
        Ok(record) if record.is_initialized() => {
            log_info("Already initialized", format!("nonce {}", record.nonce));
            return Ok(());
        }
        Ok(_) => (),
        Err(e) if e.is_not_found() => (),
        Err(e) => return Err(e.into()),
    }

    let (derived, sig) = e2e.send_initialize_seeded().await?;
    log_success("Initialize seeded", sig);

    let record = e2e.retrieve_seeded().await?;
    log_info(derived.address, format!("{:?}, nonce {}", record.tag, record.nonce));

    Ok(())
}
