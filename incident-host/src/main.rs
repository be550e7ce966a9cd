use clap::Parser;
use incident_host::cli::Args;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    incident_host::init_tracing(&args.log_level);

    let config = args.dashboard_config();
    if args.demo {
        incident_host::run_demo(config, args.ticks).await
    } else {
        incident_host::run(config).await
    }
}
