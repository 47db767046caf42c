mod cli;

use {
  clap::Parser,
  cli::{read_file, CliOpts, Command, PlanOpts, RecordOpts},
  rensa_deploy::{
    abi::{AbiOptions, ContractInterface},
    deploy::{Blueprint, ContractInstance, Deployer, SubmissionResult},
    ledger::Ledger,
    primitives::ToBase58String,
    storage::PersistentStore,
  },
  serde_json::json,
  std::path::Path,
  tracing::{debug, info, warn, Level},
};

fn inspect(abi: &Path) -> anyhow::Result<()> {
  let abi = ContractInterface::parse(&read_file(abi)?, AbiOptions {
    with_code: true,
  })?;

  println!("contract: {}", abi.name().unwrap_or("<unnamed>"));
  if !abi.code().is_empty() {
    println!(
      "embedded code: {} bytes, hash {}",
      abi.code().len(),
      rensa_deploy::code::code_hash(abi.code()).to_b58()
    );
  }

  println!("constructors:");
  for (i, c) in abi.constructors().iter().enumerate() {
    println!(
      "  [{i}] 0x{} {}{}",
      hex::encode(c.selector),
      c.signature(),
      if c.payable { " payable" } else { "" }
    );
    for line in &c.docs {
      println!("        {line}");
    }
  }

  println!("messages:");
  for m in abi.messages() {
    println!(
      "  0x{} {}{}",
      hex::encode(m.selector),
      m.signature(),
      if m.mutates { " mutates" } else { "" }
    );
    for line in &m.docs {
      println!("        {line}");
    }
  }
  Ok(())
}

fn plan(opts: &CliOpts, plan: &PlanOpts) -> anyhow::Result<()> {
  let mut deployer = Deployer::new(Ledger::new(opts.genesis_hash()?));

  deployer.load_abi(&read_file(&plan.abi)?);
  if let Some(error) = deployer.inputs().abi_error() {
    warn!("{}: {error}", plan.abi.display());
  }

  if let Some(wasm) = &plan.wasm {
    if deployer.inputs().needs_code() {
      deployer.set_code(read_file(wasm)?);
    } else {
      warn!("ignoring {}, the bundle carries its own code", wasm.display());
    }
  }

  deployer.set_constructor(plan.constructor);
  deployer.set_args(plan.args()?);
  deployer.set_endowment(plan.endowment, plan.endowment.is_some());
  deployer.override_weight(plan.weight());
  deployer.set_salt(plan.salt()?);
  deployer.set_account(plan.account);
  if let Some(name) = &plan.name {
    deployer.set_name(name.clone(), !name.trim().is_empty());
  }

  let weight = deployer.inputs().weight();
  if weight.is_zero() {
    warn!("no gas limit given, the deployment will run out of gas");
  } else {
    debug!("gas limit: {weight}");
  }

  let gate = deployer.submittability();
  let transaction = deployer.transaction();
  let report = json!({
    "constructor": deployer
      .inputs()
      .interface()
      .and_then(|i| i.constructor(deployer.inputs().constructor()))
      .map(|c| c.signature()),
    "name": deployer.inputs().name(),
    "codeHash": transaction.map(|tx| tx.code_hash().to_b58()),
    "transaction": transaction,
    "notReady": deployer.not_ready().map(ToString::to_string),
    "blockers": gate
      .blockers()
      .iter()
      .map(ToString::to_string)
      .collect::<Vec<_>>(),
  });
  println!("{}", serde_json::to_string_pretty(&report)?);

  if let Some(action) = deployer.submit() {
    info!("deployment is ready to be signed by {}", action.account);
  }
  Ok(())
}

fn record(opts: &CliOpts, record: &RecordOpts) -> anyhow::Result<()> {
  let store = PersistentStore::new(opts.data_dir()?)?;
  let mut deployer = Deployer::new(Ledger::new(opts.genesis_hash()?));

  deployer.set_abi(ContractInterface::parse(
    &read_file(&record.abi)?,
    AbiOptions::default(),
  ));
  if let Some(error) = deployer.inputs().abi_error() {
    anyhow::bail!("{}: {error}", record.abi.display());
  }
  if let Some(name) = &record.name {
    deployer.set_name(name.clone(), !name.trim().is_empty());
  }

  let result = SubmissionResult {
    blueprint: record.code_hash.map(|code_hash| Blueprint { code_hash }),
    contract: record.contract.map(|address| ContractInstance { address }),
  };

  let persisted = deployer.on_success(&result, &store, &store);
  if let Some(hash) = record.code_hash.filter(|_| persisted.code) {
    println!("{}", serde_json::to_string_pretty(&store.code(&hash)?)?);
  }
  if let Some(address) = record.contract.filter(|_| persisted.contract) {
    println!("{}", serde_json::to_string_pretty(&store.contract(&address)?)?);
  }
  Ok(())
}

fn list(opts: &CliOpts) -> anyhow::Result<()> {
  let store = PersistentStore::new(opts.data_dir()?)?;
  println!(
    "{}",
    serde_json::to_string_pretty(&json!({
      "codes": store
        .codes()?
        .into_iter()
        .map(|(hash, record)| json!({ "codeHash": hash, "record": record }))
        .collect::<Vec<_>>(),
      "contracts": store
        .contracts()?
        .into_iter()
        .map(|(address, record)| json!({ "address": address, "record": record }))
        .collect::<Vec<_>>(),
    }))?
  );
  Ok(())
}

fn main() -> anyhow::Result<()> {
  let opts = CliOpts::parse();

  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_max_level(match opts.verbose {
      1 => Level::DEBUG,
      2 => Level::TRACE,
      _ => Level::INFO,
    })
    .init();

  match &opts.command {
    Command::Inspect { abi } => inspect(abi),
    Command::Plan(plan_opts) => plan(&opts, plan_opts),
    Command::Record(record_opts) => record(&opts, record_opts),
    Command::List => list(&opts),
  }
}
