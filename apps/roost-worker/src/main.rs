use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	roost_worker::run(roost_worker::Args::parse()).await
}
