//! User Service - account database administration.

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use common::{AppError, AppResult};
use domain::{NewUser, UserChanges};
use user_service_lib::config::UserServiceConfig;
use user_service_lib::{MigrateAction, UserAction};

#[derive(Parser)]
#[command(name = "user-service")]
#[command(about = "Account storage administration")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Database migration commands
    Migrate {
        #[command(subcommand)]
        action: MigrateCommands,
    },
    /// Check the database is reachable
    Ping,
    /// Account commands
    User {
        #[command(subcommand)]
        action: UserCommands,
    },
}

#[derive(Subcommand)]
enum MigrateCommands {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset database and run all migrations
    Fresh,
}

#[derive(Subcommand)]
enum UserCommands {
    /// Register a new account
    Create(CreateArgs),
    /// Show an account by id
    Get { id: Uuid },
    /// Show an account by email
    Find { email: String },
    /// List all accounts
    List,
    /// Change names or password
    Update(UpdateArgs),
    /// Disable an account
    Disable { id: Uuid },
    /// Re-enable an account
    Enable { id: Uuid },
    /// Permanently delete an account
    Delete { id: Uuid },
}

#[derive(Args)]
struct CreateArgs {
    #[arg(long)]
    email: String,
    #[arg(long, env = "USER_PASSWORD")]
    password: String,
    #[arg(long)]
    first_name: String,
    #[arg(long)]
    last_name: String,
    /// Explicit account id instead of a generated one
    #[arg(long)]
    id: Option<Uuid>,
    /// Explicit API key instead of a generated one
    #[arg(long)]
    api_key: Option<Uuid>,
}

#[derive(Args)]
struct UpdateArgs {
    id: Uuid,
    #[arg(long)]
    first_name: Option<String>,
    #[arg(long)]
    last_name: Option<String>,
    #[arg(long)]
    password: Option<String>,
}

impl From<UserCommands> for UserAction {
    fn from(command: UserCommands) -> Self {
        match command {
            UserCommands::Create(args) => UserAction::Create(NewUser {
                email: args.email,
                password: args.password,
                first_name: args.first_name,
                last_name: args.last_name,
                id: args.id,
                api_key: args.api_key,
            }),
            UserCommands::Get { id } => UserAction::Get(id),
            UserCommands::Find { email } => UserAction::Find(email),
            UserCommands::List => UserAction::List,
            UserCommands::Update(args) => UserAction::Update(
                args.id,
                UserChanges {
                    first_name: args.first_name,
                    last_name: args.last_name,
                    password: args.password,
                },
            ),
            UserCommands::Disable { id } => UserAction::Disable(id),
            UserCommands::Enable { id } => UserAction::Enable(id),
            UserCommands::Delete { id } => UserAction::Delete(id),
        }
    }
}

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = UserServiceConfig::from_env();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_new(&config.service.log_level)
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    if let Err(err) = run(cli.command, &config).await {
        eprintln!("{}", user_service_lib::failure_message(&err));
        std::process::exit(user_service_lib::exit_code(&err));
    }
}

async fn run(command: Commands, config: &UserServiceConfig) -> AppResult<()> {
    match command {
        Commands::Migrate { action } => {
            let migrate_action = match action {
                MigrateCommands::Up => MigrateAction::Up,
                MigrateCommands::Down => MigrateAction::Down,
                MigrateCommands::Status => MigrateAction::Status,
                MigrateCommands::Fresh => MigrateAction::Fresh,
            };
            user_service_lib::run_migrations(config, migrate_action).await?;
        }
        Commands::Ping => {
            user_service_lib::ping(config).await?;
        }
        Commands::User { action } => {
            let sessions = user_service_lib::connect(config).await?;
            let service = user_service_lib::user_service(sessions);
            let output = user_service_lib::execute(service.as_ref(), action.into()).await?;
            let rendered = serde_json::to_string_pretty(&output)
                .map_err(|e| AppError::internal(e.to_string()))?;
            println!("{}", rendered);
        }
    }

    Ok(())
}
