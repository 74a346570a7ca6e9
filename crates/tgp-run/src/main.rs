use clap::Parser;

#[tokio::main]
async fn main() -> miette::Result<()> {
    tgp_run::Cli::parse().run().await
}
