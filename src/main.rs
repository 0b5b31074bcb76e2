use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{Level, info};

use name_network::input::{MustHave, read_rows_from_path};
use name_network::output::{save_graph_to_dot, save_graph_to_graphml, save_histogram};
use name_network::{NetworkConfig, NetworkPipeline};

#[derive(Parser, Debug)]
#[command(name = "name-network", about = "Build a bigram similarity network of first names")]
struct Args {
    /// Input file with first names in CSV (columns: name,n,rank).
    #[arg(long = "in-file-csv", value_name = "FILE")]
    in_file_csv: PathBuf,

    /// Output file for the name network in GraphML format.
    #[arg(long = "out-file-graphml", value_name = "FILE")]
    out_file_graphml: PathBuf,

    /// Also write the network as Graphviz DOT.
    #[arg(long = "out-file-dot", value_name = "FILE")]
    out_file_dot: Option<PathBuf>,

    /// Write the bigram histogram as plain text.
    #[arg(long = "out-histogram", value_name = "FILE")]
    out_histogram: Option<PathBuf>,

    /// JSON config file; command-line flags override its values.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Names exempt from degree pruning, one per line.
    #[arg(long = "must-have", value_name = "FILE")]
    must_have: Option<PathBuf>,

    /// Minimum frequency required for a row to be read.
    #[arg(long = "min-freq")]
    min_freq: Option<u64>,

    /// Minimum inter-name similarity for a link to be kept.
    #[arg(long = "sim-threshold")]
    sim_threshold: Option<f64>,

    /// Minimum degree required for a name to be kept.
    #[arg(long = "degree-threshold")]
    degree_threshold: Option<f64>,

    /// Names at or below this rank are always kept.
    #[arg(long = "rank-threshold")]
    rank_threshold: Option<u32>,

    /// Edge weights touching names above the rank threshold are multiplied by this.
    #[arg(long = "bonus-multiplier")]
    bonus_multiplier: Option<f64>,

    /// Louvain resolution; higher values give smaller communities.
    #[arg(long)]
    resolution: Option<f64>,

    /// Seed for the Louvain node order.
    #[arg(long)]
    seed: Option<u64>,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn network_config(&self) -> anyhow::Result<NetworkConfig> {
        let mut config = match &self.config {
            Some(path) => NetworkConfig::from_json_file(path)
                .with_context(|| format!("reading config {}", path.display()))?,
            None => NetworkConfig::default(),
        };
        if let Some(v) = self.min_freq {
            config.min_freq = v;
        }
        if let Some(v) = self.sim_threshold {
            config.sim_threshold = v;
        }
        if let Some(v) = self.degree_threshold {
            config.degree_threshold = v;
        }
        if let Some(v) = self.rank_threshold {
            config.rank_threshold = v;
        }
        if let Some(v) = self.bonus_multiplier {
            config.bonus_multiplier = v;
        }
        if let Some(v) = self.resolution {
            config.resolution = v;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(match args.verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        })
        .init();

    // 1. Resolve configuration
    let pipeline = NetworkPipeline::new(args.network_config()?)?;
    info!(config = ?pipeline.config(), "effective configuration");

    // 2. Read inputs
    let rows = read_rows_from_path(&args.in_file_csv)
        .with_context(|| format!("reading {}", args.in_file_csv.display()))?;
    let must_have = args
        .must_have
        .as_ref()
        .map(|path| {
            MustHave::from_path(path).with_context(|| format!("reading {}", path.display()))
        })
        .transpose()?;

    // 3. Build, prune, partition and color
    let output = pipeline.run(&rows, must_have.as_ref())?;

    // 4. Write outputs
    info!(path = %args.out_file_graphml.display(), "writing name network");
    save_graph_to_graphml(&output.graph, &args.out_file_graphml)
        .with_context(|| format!("writing {}", args.out_file_graphml.display()))?;
    if let Some(path) = &args.out_file_dot {
        save_graph_to_dot(&output.graph, path)
            .with_context(|| format!("writing {}", path.display()))?;
    }
    if let Some(path) = &args.out_histogram {
        save_histogram(&output.histogram, path)
            .with_context(|| format!("writing {}", path.display()))?;
    }

    // 5. Print community info
    println!(
        "{} names, {} links, {} communities (modularity {:.3})",
        output.graph.node_count(),
        output.graph.edge_count(),
        output.partition.len(),
        output.modularity
    );
    for (id, members) in output.partition.communities() {
        println!("Community {} ({} members)", id, members.len());
        info!(community = id, members = %members.join(", "), "community members");
    }

    Ok(())
}
