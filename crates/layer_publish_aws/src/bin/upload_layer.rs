use std::io;
use std::process::exit;

use clap::Parser;
use layer_publish_aws::adapters::lambda_layer::AwsLayerVersionPublisher;
use layer_publish_aws::logging::init_tracing;
use layer_publish_core::cli::{run, Cli};

#[tokio::main]
async fn main() {
    init_tracing();
    let cli = Cli::parse();

    let publisher = AwsLayerVersionPublisher::for_region(&cli.region).await;
    let code = run(&cli, &publisher, &mut io::stdout(), &mut io::stderr());
    exit(code);
}
