use clap::Parser;
use color_eyre::Result;
use dayplan::{Config, Database, Profile, cli::{Cli, Commands}, dates::local_today};

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let profile = if cli.dev {
        Profile::Dev
    } else {
        Profile::Prod
    };

    let config = Config::load_with_profile(profile)?;
    dayplan::logging::init_logging(profile, &config.log_level);
    tracing::info!(?profile, version = env!("CARGO_PKG_VERSION"), "starting dayplan");

    let db_path = config.get_database_path();
    let db = Database::new(
        db_path.to_str()
            .ok_or_else(|| color_eyre::eyre::eyre!("Database path contains invalid UTF-8"))?
    )?;

    match cli.command.unwrap_or(Commands::Tui) {
        Commands::Tui => {
            let app = dayplan::tui::App::new(config, db)?;
            dayplan::tui::run_event_loop(app)?;
        }
        Commands::Add { title, category, due, priority } => {
            dayplan::cli::handle_add(&db, &title, &category, &due, &priority, local_today())?;
        }
        Commands::Stats => {
            dayplan::cli::handle_stats(&db, local_today())?;
        }
    }

    Ok(())
}
