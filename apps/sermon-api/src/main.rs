use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = sermon_api::Args::parse();

	sermon_api::run(args).await
}
