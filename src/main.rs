use std::{fs::File, io, io::Write, path::PathBuf};

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use expense_splitter::{
    Money, SettlementEngine, dlq::TracingDLQ, engine::Engine, ingestion::CsvReader,
    policy::SplitPolicy, report::CsvReport,
};

#[derive(Copy, Clone, Debug, ValueEnum)]
enum PolicyArg {
    /// Everyone owes an equal part of the total pool
    Equal,
    /// Each expense is shared only by the people it was split among
    PerExpense,
}

impl From<PolicyArg> for SplitPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Equal => SplitPolicy::Equal,
            PolicyArg::PerExpense => SplitPolicy::PerExpense,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "expense_splitter", version, about = "Split shared expenses and settle up")]
struct Cli {
    /// Event log (CSV: type,name,amount,split_among,description,timestamp)
    input: PathBuf,

    /// Where to write the report (stdout by default)
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// How each participant's fair share is computed
    #[arg(long = "split-policy", value_enum, default_value_t = PolicyArg::Equal)]
    split_policy: PolicyArg,

    /// Balances this close to zero are treated as settled
    #[arg(long = "tolerance", default_value = "0.01", value_parser = parse_money)]
    tolerance: Money,
}

fn parse_money(s: &str) -> Result<Money, String> {
    Money::from_decimal_str(s).ok_or_else(|| format!("not a decimal amount: {s}"))
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();
    let cli = Cli::parse();

    let ingestion = CsvReader::new(File::open(&cli.input)?);
    let writer: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout()),
    };
    let settlement =
        SettlementEngine::new(SplitPolicy::from(cli.split_policy)).with_tolerance(cli.tolerance);

    let mut engine = Engine::new(
        ingestion,
        CsvReport::new(writer),
        TracingDLQ::default(),
        settlement,
    );

    engine.process().await?;
    engine.flush()?;

    Ok(())
}
