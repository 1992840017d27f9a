use clap::{Parser, Subcommand};

mod db;
mod token;
mod user;

/// Pool size for one-shot administrative commands.
const CLI_MAX_CONNECTIONS: u32 = 2;

#[derive(Debug, Parser)]
#[command(name = "storefront-app", about = "Storefront CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    User(user::UserCommand),
    Token(token::TokenCommand),
    Db(db::DbCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::User(command) => user::run(command).await,
            Commands::Token(command) => token::run(command).await,
            Commands::Db(command) => db::run(command).await,
        }
    }
}

async fn connect(database_url: &str) -> Result<sqlx::PgPool, String> {
    storefront_app::database::connect(database_url, CLI_MAX_CONNECTIONS)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))
}
