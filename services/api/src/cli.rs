use crate::demo::{run_demo, DemoArgs};
use crate::inventory::{run_list, run_quote, ListArgs, QuoteArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use konastone::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "konastone",
    about = "Run the Konastone Autos storefront API and inventory tools",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Browse and price the configured inventory
    Inventory {
        #[command(subcommand)]
        command: InventoryCommand,
    },
    /// Walk through browsing, pricing and lead capture against the seeded showroom
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum InventoryCommand {
    /// List vehicles matching the given filters
    List(ListArgs),
    /// Price a hire-purchase plan for one vehicle
    Quote(QuoteArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Inventory {
            command: InventoryCommand::List(args),
        } => run_list(args),
        Command::Inventory {
            command: InventoryCommand::Quote(args),
        } => run_quote(args),
        Command::Demo(args) => run_demo(args),
    }
}
