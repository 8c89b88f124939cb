use clap::Parser;
use tripotter_gate::config::Args;

// this is main async function with tokio
#[tokio::main]
async fn main() {
    // parse cli arguments
    let args = Args::parse();
    tripotter_gate::start_server(args).await;
}
