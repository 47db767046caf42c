use {
  anyhow::{anyhow, Context},
  clap::{Args, Parser, Subcommand},
  multihash::Multihash,
  rand::RngCore,
  rensa_deploy::primitives::{parse_multihash, Balance, Pubkey, Weight},
  serde_json::Value,
  std::path::{Path, PathBuf},
};

#[derive(Debug, Parser)]
#[clap(version, about)]
pub struct CliOpts {
  #[clap(
    short,
    long,
    global = true,
    parse(from_occurrences),
    help = "Use verbose output (-vv very verbose output)"
  )]
  pub verbose: u64,

  #[clap(
    long,
    global = true,
    parse(from_os_str),
    help = "path to the data directory",
    default_value = "~/.rensa-deploy/"
  )]
  data_dir: PathBuf,

  #[clap(
    long,
    global = true,
    parse(try_from_str = parse_multihash),
    help = "base58 genesis hash of the target chain"
  )]
  genesis_hash: Option<Multihash>,

  #[clap(subcommand)]
  pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
  /// Lists the constructors and messages of a contract ABI
  Inspect {
    #[clap(long, parse(from_os_str), help = "path to the ABI or bundle")]
    abi: PathBuf,
  },

  /// Builds the deployment transaction and reports what is missing
  Plan(PlanOpts),

  /// Records a confirmed deployment in the local stores
  Record(RecordOpts),

  /// Lists all deployments recorded in the local stores
  List,
}

#[derive(Debug, Args)]
pub struct PlanOpts {
  #[clap(long, parse(from_os_str), help = "path to the ABI or bundle")]
  pub abi: PathBuf,

  #[clap(
    long,
    parse(from_os_str),
    help = "path to the WASM code, unless the bundle carries it"
  )]
  pub wasm: Option<PathBuf>,

  #[clap(long, help = "index of the constructor", default_value = "0")]
  pub constructor: usize,

  #[clap(long, help = "constructor arguments as a JSON array")]
  args: Option<String>,

  #[clap(long, help = "balance transferred to the new contract")]
  pub endowment: Option<Balance>,

  #[clap(long, help = "gas limit in reference time")]
  gas_ref_time: Option<u64>,

  #[clap(long, help = "gas limit in storage proof size")]
  gas_proof_size: Option<u64>,

  #[clap(long, help = "hex encoded salt of the contract address")]
  salt: Option<String>,

  #[clap(long, conflicts_with = "salt", help = "use a random 32 byte salt")]
  random_salt: bool,

  #[clap(long, help = "base58 address of the signing account")]
  pub account: Option<Pubkey>,

  #[clap(long, help = "name under which the deployment is recorded")]
  pub name: Option<String>,
}

#[derive(Debug, Args)]
pub struct RecordOpts {
  #[clap(long, parse(from_os_str), help = "path to the ABI or bundle")]
  pub abi: PathBuf,

  #[clap(long, help = "name under which the deployment is recorded")]
  pub name: Option<String>,

  #[clap(
    long,
    parse(try_from_str = parse_multihash),
    required_unless_present = "contract",
    help = "base58 hash of the uploaded code"
  )]
  pub code_hash: Option<Multihash>,

  #[clap(long, help = "base58 address of the instantiated contract")]
  pub contract: Option<Pubkey>,
}

impl CliOpts {
  /// The genesis hash is only needed by commands that
  /// deal with a specific chain.
  pub fn genesis_hash(&self) -> anyhow::Result<Multihash> {
    self
      .genesis_hash
      .ok_or_else(|| anyhow!("--genesis-hash is required for this command"))
  }

  /// Gets the data directory with `~` and environment
  /// variables expanded, creating it if needed.
  pub fn data_dir(&self) -> Result<PathBuf, std::io::Error> {
    let dir: PathBuf = shellexpand::full(&self.data_dir.to_string_lossy())
      .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?
      .to_string()
      .into();
    std::fs::create_dir_all(dir.clone())?;
    Ok(dir)
  }
}

impl PlanOpts {
  pub fn args(&self) -> anyhow::Result<Vec<Value>> {
    match &self.args {
      Some(args) => serde_json::from_str(args)
        .context("constructor arguments must be a JSON array"),
      None => Ok(vec![]),
    }
  }

  /// A gas limit given on the command line. A missing
  /// dimension counts as zero.
  pub fn weight(&self) -> Option<Weight> {
    match (self.gas_ref_time, self.gas_proof_size) {
      (None, None) => None,
      (ref_time, proof_size) => Some(Weight::new(
        ref_time.unwrap_or(0),
        proof_size.unwrap_or(0),
      )),
    }
  }

  pub fn salt(&self) -> anyhow::Result<Vec<u8>> {
    if self.random_salt {
      let mut salt = vec![0u8; 32];
      rand::thread_rng().fill_bytes(&mut salt);
      return Ok(salt);
    }
    match &self.salt {
      Some(salt) => hex::decode(salt.trim_start_matches("0x"))
        .context("salt must be hex encoded"),
      None => Ok(vec![]),
    }
  }
}

pub fn read_file(path: &Path) -> anyhow::Result<Vec<u8>> {
  std::fs::read(path).with_context(|| format!("reading {}", path.display()))
}
