use clap::Parser;
use widget_mcp_app::cli::{self, Cli};
use widget_mcp_app::config::Config;
use widget_mcp_app::observability;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = Config::load(&cli.config)?;
    config.validate()?;
    observability::init_tracing(config.log_format);

    let output = cli::execute(cli.command, &config).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
