use clap::Parser;
use log::info;

use shannon_mux::control::ControlStatistics;
use shannon_mux::decompose::{DecomposeConfig, Decomposer};
use shannon_mux::expr::Expression;
use shannon_mux::minterm::MintermSet;

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Function definition, e.g. "f = ~a&~b | a&b".
    #[arg(value_name = "EXPR", default_value = "f = ~a*~b*~c + a*~b*~c + a*b*~c + a*b*c + d")]
    expr: String,

    /// Reduce every residual before choosing its control variable.
    #[clap(long)]
    minimize: bool,

    /// Maximum number of multiplexer levels.
    #[clap(long, value_name = "INT")]
    max_depth: Option<usize>,

    /// Log every expansion step.
    #[clap(short, long)]
    verbose: bool,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Cli::parse();

    simplelog::TermLogger::init(
        if args.verbose {
            simplelog::LevelFilter::Debug
        } else {
            simplelog::LevelFilter::Info
        },
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let time_total = std::time::Instant::now();
    println!("args = {:?}", args);

    let expr = Expression::parse(&args.expr)?;
    println!("expr = {}", expr);
    println!("literals = {}", expr.literals());

    let set = MintermSet::from_expression(&expr)?;
    println!("minterms = {}", set);
    println!("sop = {}", set.to_sop_string(expr.literals()));

    let stats = ControlStatistics::compute(&set);
    for (i, name) in expr.literals().iter().enumerate() {
        println!(
            "  {}: zeros = {}, ones = {}, balance = {}",
            name,
            stats.zero_count(i),
            stats.one_count(i),
            stats.balance(i)
        );
    }

    let mut config = DecomposeConfig::default().with_minimize(args.minimize);
    if let Some(max_depth) = args.max_depth {
        config = config.with_max_depth(max_depth);
    }
    let decomposer = Decomposer::new(config);
    info!("Decomposing with {:?}", decomposer.config());

    let tree = decomposer.decompose_expression(&expr)?;
    println!("{}", tree);
    println!(
        "depth = {}, nodes = {}, terminals = {}",
        tree.root().depth(),
        tree.root().node_count(),
        tree.root().terminals().len()
    );
    println!("models = {} of 2^{}", tree.sat_count(), expr.literals().len());

    let time_total = time_total.elapsed();
    println!("Done in {:.3} s", time_total.as_secs_f64());

    Ok(())
}
