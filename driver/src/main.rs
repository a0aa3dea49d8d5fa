use anyhow::{bail, Context};
use clap::Parser;
use generator::profile::{write_dataset, GeneratorConfig};
use render_bridge::bridge::RenderBridge;
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::runtime::Builder as TokioBuilder;
use tokio::signal;
use workflow::config::WorkflowConfig;
use workflow::runner::Runner;

mod generator;
mod render_bridge;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Cell trace correlation driver")]
struct Args {
    /// Load a workflow config from YAML
    #[arg(long)]
    workflow: Option<PathBuf>,
    /// Observation file or directory in the named-column schema (repeatable)
    #[arg(long, value_name = "PATH")]
    current: Vec<PathBuf>,
    /// Observation file or directory in the positional schema (repeatable)
    #[arg(long, value_name = "PATH")]
    legacy: Vec<PathBuf>,
    /// Semicolon-delimited tower registry (repeatable)
    #[arg(long, value_name = "PATH")]
    towers: Vec<PathBuf>,
    /// Where to write the render document (JSON)
    #[arg(long)]
    output: Option<PathBuf>,
    /// Write a synthetic dataset into DIR and exit
    #[arg(long, value_name = "DIR")]
    generate: Option<PathBuf>,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Keep serving the render document over HTTP until Ctrl+C
    #[arg(long, default_value_t = false)]
    serve: bool,
    #[arg(long, default_value = "127.0.0.1:9000")]
    bind: SocketAddr,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    if let Some(dir) = args.generate {
        let config = GeneratorConfig {
            seed: args.seed,
            ..Default::default()
        };
        let dataset = write_dataset(&dir, &config)?;
        println!(
            "Synthetic dataset -> current {}, legacy {}, towers {}",
            dataset.current.display(),
            dataset.legacy.display(),
            dataset.towers.display()
        );
        return Ok(());
    }

    let mut workflow_config = if let Some(path) = args.workflow {
        WorkflowConfig::load(path)?
    } else {
        WorkflowConfig::from_args(args.current, args.legacy, args.towers)
    };
    if let Some(output) = args.output {
        workflow_config.output = output;
    }
    if workflow_config.observations.is_empty() {
        bail!("no observation sources given (use --workflow, --current or --legacy)");
    }

    let output_path = workflow_config.output.clone();
    let runner = Runner::new(workflow_config);
    let model = runner.execute()?;
    runner.write(&model)?;

    let best = model
        .best
        .map(|best| format!("cell {} ({} matches)", best.tower.cell_id, best.matches))
        .unwrap_or_else(|| "none".to_string());
    println!(
        "Run -> directives {}, best tower {}, rows {} (skipped {}), towers {}/{} -> {}",
        model.directives.len(),
        best,
        model.metrics.rows_parsed,
        model.metrics.rows_skipped,
        model.metrics.towers_retained,
        model.metrics.towers_read,
        output_path.display()
    );
    for warning in &model.warnings {
        println!("  warning: {}", warning);
    }

    if args.serve {
        let bridge = RenderBridge::new();
        bridge.publish(&model)?;
        bridge.serve(args.bind);
        bridge.publish_status(&format!(
            "serving http://{}/directives (Ctrl+C to stop)...",
            args.bind
        ));
        let runtime = TokioBuilder::new_current_thread()
            .enable_all()
            .build()
            .context("creating runtime for signal handling")?;
        runtime.block_on(async {
            signal::ctrl_c().await.context("awaiting Ctrl+C to exit")?;
            Ok::<(), anyhow::Error>(())
        })?;
    }

    Ok(())
}
