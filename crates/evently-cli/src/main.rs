use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;

use evently_auth::{Role, TokenIssuer};
use evently_cli::admin::{self, AdminError};
use evently_cli::seeder::{self, SEED_PASSWORD, SeedConfig};
use evently_config::{DatabaseConfig, JwtConfig};
use evently_db::{RefreshTokenStore, SqlitePool, init_db_pool, run_migrations};

#[derive(Parser)]
#[command(name = "evently-cli")]
#[command(about = "Evently CLI - Administrative tools for Evently", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new administrator account
    CreateAdmin {
        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Change a user's role and sign them out everywhere
    Promote {
        /// Email of the user to change
        email: String,

        /// Role to assign
        #[arg(short = 'r', long, default_value = "admin")]
        role: Role,
    },
    /// Delete expired refresh tokens
    PurgeTokens,
    /// Seed the database with fake users and events
    Seed {
        /// Number of users to create
        #[arg(short = 'u', long, default_value = "10")]
        users: usize,

        /// Number of events to create, spread across the new users
        #[arg(short = 'n', long, default_value = "25")]
        events: usize,
    },
    /// Delete all seeded users along with their events and registrations
    ClearSeed,
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();

    let pool = match connect().await {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("❌ Failed to open database: {}", e);
            std::process::exit(1);
        }
    };

    match cli.command {
        Commands::CreateAdmin { email, password } => {
            handle_create_admin(&pool, email, password).await
        }
        Commands::Promote { email, role } => handle_promote(&pool, &email, role).await,
        Commands::PurgeTokens => handle_purge_tokens(&pool).await,
        Commands::Seed { users, events } => handle_seed(&pool, users, events).await,
        Commands::ClearSeed => handle_clear_seed(&pool).await,
    }
}

async fn connect() -> anyhow::Result<SqlitePool> {
    let pool = init_db_pool(&DatabaseConfig::from_env()).await?;
    run_migrations(&pool).await?;
    Ok(pool)
}

fn prompt_email() -> String {
    match Input::<String>::new()
        .with_prompt("Email address")
        .interact_text()
    {
        Ok(email) => email,
        Err(e) => {
            eprintln!("❌ Failed to read email: {}", e);
            std::process::exit(1);
        }
    }
}

fn prompt_password() -> String {
    match Password::new()
        .with_prompt("Password")
        .with_confirmation("Confirm password", "Passwords don't match")
        .interact()
    {
        Ok(password) => password,
        Err(e) => {
            eprintln!("❌ Failed to read password: {}", e);
            std::process::exit(1);
        }
    }
}

async fn handle_create_admin(pool: &SqlitePool, email: Option<String>, password: Option<String>) {
    let email = email.unwrap_or_else(prompt_email);
    let password = password.unwrap_or_else(prompt_password);

    match admin::create_admin(pool, &email, &password).await {
        Ok(user) => {
            println!("\n✅ Admin created successfully!");
            println!("   Id: {}", user.id);
            println!("   Email: {}", user.email);
        }
        Err(e) => {
            eprintln!("\n❌ Error creating admin: {}", e);
            std::process::exit(1);
        }
    }
}

async fn handle_promote(pool: &SqlitePool, email: &str, role: Role) {
    match admin::set_role(pool, email, role).await {
        Ok((user, revoked)) => {
            println!("✅ {} is now {}", user.email, user.role);
            println!("   Revoked {} refresh token(s)", revoked);
        }
        Err(AdminError::UserNotFound(email)) => {
            eprintln!("❌ No user found with email {}", email);
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("\n❌ Error changing role: {}", e);
            std::process::exit(1);
        }
    }
}

async fn handle_purge_tokens(pool: &SqlitePool) {
    let store = RefreshTokenStore::new(pool.clone(), TokenIssuer::new(JwtConfig::from_env()));

    match store.delete_expired().await {
        Ok(count) => println!("✅ Deleted {} expired refresh token(s)", count),
        Err(e) => {
            eprintln!("\n❌ Error purging refresh tokens: {}", e);
            std::process::exit(1);
        }
    }
}

async fn handle_seed(pool: &SqlitePool, users: usize, events: usize) {
    println!("🌱 Seeding {} users and {} events...", users, events);

    match seeder::seed(pool, SeedConfig { users, events }).await {
        Ok(summary) => {
            println!("✅ Created {} users", summary.users);
            println!("✅ Created {} events", summary.events);
            println!("   Seeded users log in with password: {}", SEED_PASSWORD);
        }
        Err(e) => {
            eprintln!("\n❌ Error seeding database: {}", e);
            std::process::exit(1);
        }
    }
}

async fn handle_clear_seed(pool: &SqlitePool) {
    match seeder::clear_seed(pool).await {
        Ok(count) => println!("✅ Removed {} seeded users", count),
        Err(e) => {
            eprintln!("\n❌ Error clearing seed data: {}", e);
            std::process::exit(1);
        }
    }
}
