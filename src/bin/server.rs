use clap::Parser;
use color_eyre::eyre::Result;
use std::sync::Arc;

use release_notes::{
    cli::ServerArgs, logging::initialize_logger,
    notes::generator::NotesGenerator, server,
};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = ServerArgs::parse();

    initialize_logger(args.debug)?;

    let config = args.load_config()?;
    let generator = NotesGenerator::from_config(config)?;

    server::serve(args.addr(), Arc::new(generator)).await?;

    Ok(())
}
