use clap::Parser;
use component_typegen::{generate, GeneratorConfig};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Generate global tag-name typings for the web components in a project.
#[derive(Parser, Debug)]
#[command(name = "component-typegen")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Directory containing the components, relative to the working directory
    #[arg(value_name = "COMPONENT_ROOT")]
    component_root: Option<String>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("component_typegen=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = GeneratorConfig::new(std::env::current_dir()?);
    config.component_root = cli.component_root;

    let report = generate(&config)?;
    for component in &report.components {
        println!("  <{}> {}", component.tag_name, component.class_name);
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::from(1)
        }
    }
}
