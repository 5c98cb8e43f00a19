use clap::Parser;
use keyfob::cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Create {
            ref user,
            ref category,
            ref service_key,
        } => keyfob::cli::commands::create::execute(&cli, user, category, service_key),
        Commands::Get {
            ref user,
            ref category,
            ref service_key,
        } => keyfob::cli::commands::get::execute(&cli, user, category, service_key),
        Commands::List {
            ref user,
            ref service_key,
            ref format,
        } => keyfob::cli::commands::list::execute(&cli, user, service_key, format),
        Commands::Delete {
            ref user,
            ref category,
            force,
        } => keyfob::cli::commands::delete::execute(&cli, user, category, force),
        Commands::Version => keyfob::cli::commands::version::execute(),
        Commands::Completions { ref shell } => keyfob::cli::commands::completions::execute(shell),
    };

    if let Err(e) = result {
        keyfob::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
