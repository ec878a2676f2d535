//! cafe — runs the café robots end to end.
//!
//! Two customers, one staff robot and the director work through the order
//! list in automatic mode.  The staff account log lands next to the CSV
//! tables; robot snapshots and tick summaries go to the trace directory.
//!
//! ```text
//! cafe [--config run.json] [--data DIR] [--out DIR] [--keys "0:r,1:1,..."]
//! ```

mod config;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use cafe_agent::AgentSnapshot;
use cafe_core::{AgentId, Tick};
use cafe_ledger::CsvStore;
use cafe_ledger::csv::{MENU_FILE, ORDER_FILE, STARTING_FILE};
use cafe_output::{CsvTraceWriter, TraceObserver, TraceWriter};
use cafe_sim::{KeyScript, SimBuilder, SimObserver};

use config::CafeConfig;

// ── Default tables ────────────────────────────────────────────────────────────

const STARTING_CSV: &str = "\
robot,balance\n\
1,10.00\n\
2,8.00\n\
5,100.00\n\
";

const MENU_CSV: &str = "\
item,prep_time_secs,price\n\
Coffee,5,3.50\n\
Tea,3,2.00\n\
Cake,8,4.25\n\
";

// The last line is not on the menu.
const ORDER_CSV: &str = "\
customer,item\n\
1,Coffee\n\
2,Tea\n\
1,Cake\n\
2,Muffin\n\
";

const DEFAULT_DIR: &str = "output/cafe";

// ── CLI ───────────────────────────────────────────────────────────────────────

/// Café robot coordination run.
#[derive(Parser, Debug)]
#[command(name = "cafe", version, long_about = None)]
struct Args {
    /// JSON run configuration (defaults apply when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding Starting.csv, Menu.csv and Order.csv.
    /// Default tables are written to output/cafe when omitted.
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Directory for robot_snapshots.csv and tick_summaries.csv
    #[arg(short, long, default_value = DEFAULT_DIR)]
    out: PathBuf,

    /// Key script overriding the one in the config, e.g. "0:a"
    #[arg(short, long)]
    keys: Option<String>,
}

// ── Observer wrapper to count rows ────────────────────────────────────────────

struct CountingObserver<W: TraceWriter> {
    inner:         TraceObserver<W>,
    snapshot_rows: usize,
    summary_rows:  usize,
}

impl<W: TraceWriter> CountingObserver<W> {
    fn new(inner: TraceObserver<W>) -> Self {
        Self { inner, snapshot_rows: 0, summary_rows: 0 }
    }
}

impl<W: TraceWriter> SimObserver for CountingObserver<W> {
    fn on_tick_end(&mut self, tick: Tick, delivered: usize) {
        self.summary_rows += 1;
        self.inner.on_tick_end(tick, delivered);
    }

    fn on_snapshot(&mut self, tick: Tick, robots: &[AgentSnapshot]) {
        self.snapshot_rows += robots.len();
        self.inner.on_snapshot(tick, robots);
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.inner.on_sim_end(final_tick);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let args = Args::parse();

    // 1. Configuration.
    let config = match &args.config {
        Some(path) => CafeConfig::load(path)?,
        None => CafeConfig::default(),
    };
    let keys: KeyScript = args.keys.as_deref().unwrap_or(&config.keys).parse()?;

    // 2. Tables.
    let data = match args.data {
        Some(dir) => dir,
        None => seed_default_tables(Path::new(DEFAULT_DIR))?,
    };
    info!(data = %data.display(), "loading tables");

    // 3. Build sim.
    let mut builder = SimBuilder::new(config.sim.clone())
        .world(config.world.clone())
        .layout(config.layout.clone())
        .keys(keys)
        .director(CsvStore::for_director(&data)?)
        .staff(config.staff_start, CsvStore::for_staff(&data)?);
    for customer in &config.customers {
        builder = builder.customer(AgentId(customer.id), customer.start, CsvStore::for_customer(&data)?);
    }
    let mut sim = builder.build()?;

    // 4. Set up output.
    std::fs::create_dir_all(&args.out).with_context(|| format!("creating {}", args.out.display()))?;
    let writer = CsvTraceWriter::new(&args.out)?;
    let mut obs = CountingObserver::new(TraceObserver::new(writer, &config.sim));

    // 5. Run.
    let t0 = Instant::now();
    let summary = sim.run(&mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        warn!("trace error: {e}");
    }

    // 6. Summary.
    println!("Run complete in {:.3} s wall, {} ticks ({:.1} s simulated)", elapsed.as_secs_f64(), summary.ticks, summary.elapsed_ms as f64 / 1000.0);
    println!("  orders completed    : {}", summary.orders_completed);
    println!("  messages delivered  : {}", summary.messages_delivered);
    println!("  all terminated      : {}", summary.all_terminated);
    println!("  robot_snapshots.csv : {} rows", obs.snapshot_rows);
    println!("  tick_summaries.csv  : {} rows", obs.summary_rows);
    println!();

    println!("{:<8} {:<10} {:<12} {:>10}", "Robot", "Role", "Mode", "Balance");
    println!("{}", "-".repeat(43));
    for snap in sim.snapshots() {
        println!("{:<8} {:<10} {:<12} {:>10}", snap.id.to_string(), snap.role.as_str(), snap.mode.as_str(), snap.balance.to_string());
    }

    Ok(())
}

/// Write the built-in tables into `dir`, replacing earlier copies.
fn seed_default_tables(dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    for (name, body) in [(STARTING_FILE, STARTING_CSV), (MENU_FILE, MENU_CSV), (ORDER_FILE, ORDER_CSV)] {
        std::fs::write(dir.join(name), body).with_context(|| format!("writing {name}"))?;
    }
    Ok(dir.to_path_buf())
}
