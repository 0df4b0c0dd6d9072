use anyhow::Context;
use clap::{Parser, Subcommand};
use metaspec::{
    ArchiveSink, Codec, Config, DirectorySink, SearchPath, Specification, logging,
};
use std::path::{Path, PathBuf};

pub type Result<T> = anyhow::Result<T>;

#[derive(Parser)]
#[command(name = "metaspec")]
#[command(about = "Distributed metadata specification tool", long_about = None)]
struct Cli {
    /// JSON config file (layout, name pattern, indentation).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log filter, used when RUST_LOG is not set.
    #[arg(long, global = true)]
    log_filter: Option<String>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write one specification into a directory or a new .zip/.jar archive.
    Write {
        #[arg(short = 'o', long)]
        out: PathBuf,

        #[arg(long)]
        name: String,

        #[arg(long = "dep")]
        dependencies: Vec<String>,
    },

    /// Print the dependency closure of the given names, in load order.
    Resolve {
        #[arg(long = "path", required = true)]
        paths: Vec<PathBuf>,

        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Print every specification visible on the search path.
    Discover {
        #[arg(long = "path", required = true)]
        paths: Vec<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.log_filter.as_deref());

    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    let codec = Codec::from_config(&config)?;

    match cli.cmd {
        Commands::Write {
            out,
            name,
            dependencies,
        } => {
            let spec = Specification::with_rules(codec.rules(), name, dependencies)?;
            let written = if is_archive_path(&out) {
                let mut sink = ArchiveSink::create(&out)?;
                let written = metaspec::write_specification(&mut sink, &codec, &spec)?;
                sink.finish()?;
                written
            } else {
                let mut sink = DirectorySink::new(&out);
                metaspec::write_specification(&mut sink, &codec, &spec)?
            };
            println!("Wrote {} to {}", written, out.display());
        }
        Commands::Resolve { paths, names } => {
            let search_path = SearchPath::from_paths(paths)?;
            let specs = metaspec::resolve_closure(&search_path, &codec, names)
                .context("resolve specification closure")?;
            for spec in specs {
                println!("{}", spec);
            }
        }
        Commands::Discover { paths } => {
            let search_path = SearchPath::from_paths(paths)?;
            let specs = metaspec::discover_all(&search_path, &codec)
                .context("discover specifications")?;
            for spec in specs.values() {
                println!("{}", spec);
            }
        }
    }

    Ok(())
}

fn is_archive_path(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("zip") | Some("jar")
    )
}
