use clap::Parser;
use color_eyre::eyre::{Result, eyre};

use release_notes::{
    cli::Args,
    logging::initialize_logger,
    notes::{
        format::format_release_notes, generator::NotesGenerator,
        traits::NotesService,
    },
};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();

    initialize_logger(args.debug)?;

    let config = args.load_config()?;
    let generator = NotesGenerator::from_config(config)?;

    let notes = generator
        .query_for_release_notes(
            args.repos,
            args.current_commit,
            args.previous_commit,
            args.staged,
        )
        .await;

    println!("{}", format_release_notes(&notes, args.staged));

    let failed = notes.iter().filter(|n| n.is_failed()).count();

    if failed > 0 {
        return Err(eyre!(
            "failed to generate release notes for {failed} of {} repositories",
            notes.len()
        ));
    }

    Ok(())
}
