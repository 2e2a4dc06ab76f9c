// Entrypoint for the CLI application.
// - Keeps `main` small: resolve config, build the client and hand a
//   session to the UI loop.
// - Returns `anyhow::Result` so only terminal failures end the process.

use clap::Parser;
use menu_semanal_cli::ui::{main_menu, WithSpinner};
use menu_semanal_cli::{logger, Cli, CompletionClient, Config, MenuStore, Session};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load(&cli);
    logger::init(config.verbose);

    let client = CompletionClient::new(&config.api)?;
    tracing::info!("Using model {} via {}", client.model(), config.api.api_base);

    let session = Session::new(WithSpinner::new(client), MenuStore::new(config.menu_file));

    // Blocks until the user picks "Salir".
    main_menu(&session)?;
    Ok(())
}
