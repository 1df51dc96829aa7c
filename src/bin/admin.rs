//! CLI administration tool for the base-62 URL shortener.
//!
//! Manages users and their API tokens, inspects stored links and converts
//! between ids and short codes without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Create a user and issue them a token
//! cargo run --bin admin -- user create alice
//! cargo run --bin admin -- token create --user alice --name "CLI"
//!
//! # List tokens, revoke one
//! cargo run --bin admin -- token list
//! cargo run --bin admin -- token revoke --user alice "CLI"
//! cargo run --bin admin -- token revoke 3
//!
//! # Links created by a user
//! cargo run --bin admin -- urls list --user alice
//!
//! # Codec helpers (no database needed)
//! cargo run --bin admin -- code encode 100
//! cargo run --bin admin -- code decode 1C
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required for all but `code`): PostgreSQL connection string
//! - `TOKEN_SIGNING_SECRET` (required for `token create`): must match the server's
//! - `BASE_URL` (optional): origin used when printing short URLs

use base62_url_shortener::application::services::auth_service::hash_token;
use base62_url_shortener::domain::entities::User;
use base62_url_shortener::domain::repositories::{
    ApiToken, TokenRepository, UrlRepository, UserRepository,
};
use base62_url_shortener::infrastructure::persistence::{
    PgTokenRepository, PgUrlRepository, PgUserRepository,
};
use base62_url_shortener::utils::base62;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing the URL shortener.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage users
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Manage API tokens
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },

    /// Inspect stored links
    Urls {
        #[command(subcommand)]
        action: UrlsAction,
    },

    /// Convert between ids and short codes
    Code {
        #[command(subcommand)]
        action: CodeAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// User management subcommands.
#[derive(Subcommand)]
enum UserAction {
    /// Create a new user
    Create {
        /// Unique user name
        name: String,
    },

    /// List all users
    List,
}

/// Token management subcommands.
#[derive(Subcommand)]
enum TokenAction {
    /// Issue a new API token to a user
    Create {
        /// Name of the user the token identifies
        #[arg(short, long)]
        user: String,

        /// Token name (e.g., "CLI", "Mobile App")
        #[arg(short, long)]
        name: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List all tokens
    List,

    /// Revoke a token by ID, or by name together with its user
    Revoke {
        /// User the named token was issued to
        #[arg(short, long)]
        user: Option<String>,

        /// Token name or ID to revoke
        name_or_id: String,
    },
}

/// Link inspection subcommands.
#[derive(Subcommand)]
enum UrlsAction {
    /// List links created by a user, oldest first
    List {
        /// User name
        #[arg(short, long)]
        user: String,
    },
}

/// Codec subcommands.
#[derive(Subcommand)]
enum CodeAction {
    /// Print the short code for an id
    Encode {
        #[arg(allow_negative_numbers = true)]
        id: i64,
    },

    /// Print the id behind a short code
    Decode { code: String },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Code { action } => handle_code_action(action)?,
        Commands::User { action } => handle_user_action(action, connect().await?).await?,
        Commands::Token { action } => handle_token_action(action, connect().await?).await?,
        Commands::Urls { action } => handle_urls_action(action, connect().await?).await?,
        Commands::Db { action } => handle_db_action(action, connect().await?).await?,
    }

    Ok(())
}

/// Connects to `DATABASE_URL`.
async fn connect() -> Result<Arc<PgPool>> {
    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    Ok(Arc::new(pool))
}

/// Converts ids to codes and back.
fn handle_code_action(action: CodeAction) -> Result<()> {
    match action {
        CodeAction::Encode { id } => {
            let code = base62::encode_signed(id)?;
            println!("{}", code.bright_yellow().bold());
        }
        CodeAction::Decode { code } => {
            let id = base62::decode(&code)?;
            println!("{}", id.to_string().bright_yellow().bold());
        }
    }

    Ok(())
}

/// Dispatches user management commands.
async fn handle_user_action(action: UserAction, pool: Arc<PgPool>) -> Result<()> {
    let repo = PgUserRepository::new(pool);

    match action {
        UserAction::Create { name } => {
            let user = repo
                .create(&name)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to create user: {}", e))?;

            println!(
                "{} {} (id {})",
                "✅ User created:".green().bold(),
                user.name.cyan(),
                user.id.to_string().bright_black()
            );
        }
        UserAction::List => {
            let users = repo
                .list()
                .await
                .map_err(|e| anyhow::anyhow!("Failed to list users: {}", e))?;

            println!("{}", "👤 Users".bright_blue().bold());
            println!();

            if users.is_empty() {
                println!("{}", "  No users found".yellow());
                return Ok(());
            }

            println!(
                "  {:<5} {:<30} {:<20}",
                "ID".bright_white().bold(),
                "Name".bright_white().bold(),
                "Created".bright_white().bold()
            );
            println!("  {}", "─".repeat(57).bright_black());

            for user in &users {
                println!(
                    "  {:<5} {:<30} {}",
                    user.id.to_string().bright_black(),
                    user.name.cyan(),
                    user.created_at
                        .format("%Y-%m-%d %H:%M")
                        .to_string()
                        .bright_black()
                );
            }
            println!();
        }
    }

    Ok(())
}

/// Looks up a user by name, failing with a readable message.
async fn require_user(pool: Arc<PgPool>, name: &str) -> Result<User> {
    PgUserRepository::new(pool)
        .find_by_name(name)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .with_context(|| format!("User '{}' not found", name))
}

/// Dispatches token management commands.
async fn handle_token_action(action: TokenAction, pool: Arc<PgPool>) -> Result<()> {
    let repo = PgTokenRepository::new(pool.clone());

    match action {
        TokenAction::Create { user, name, yes } => {
            let user = require_user(pool, &user).await?;
            create_token(&repo, &user, name, yes).await?;
        }
        TokenAction::List => {
            list_tokens(&repo).await?;
        }
        TokenAction::Revoke { user, name_or_id } => {
            let token = match (name_or_id.parse::<i64>(), user) {
                (Ok(id), _) => repo.find_by_id(id).await,
                (Err(_), Some(user)) => {
                    let user = require_user(pool, &user).await?;
                    repo.find_by_name(user.id, &name_or_id).await
                }
                (Err(_), None) => {
                    anyhow::bail!("Token names are per user; pass --user or a token ID")
                }
            }
            .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
            .context("Token not found")?;

            revoke_token(&repo, token).await?;
        }
    }

    Ok(())
}

/// Issues a new API token with interactive prompts.
///
/// # Flow
///
/// 1. Prompt for token name (or use provided)
/// 2. Generate random token
/// 3. Display token details with warning
/// 4. Confirm creation (unless `--yes` flag)
/// 5. Hash token with HMAC-SHA256 under `TOKEN_SIGNING_SECRET`
/// 6. Store the hash in database
///
/// The raw token is displayed once and cannot be retrieved later.
async fn create_token(
    repo: &PgTokenRepository,
    user: &User,
    name: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    let secret =
        std::env::var("TOKEN_SIGNING_SECRET").context("TOKEN_SIGNING_SECRET must be set")?;
    anyhow::ensure!(!secret.is_empty(), "TOKEN_SIGNING_SECRET must not be empty");

    println!("{}", "🔑 Create API Token".bright_blue().bold());
    println!();

    let token_name = match name {
        Some(n) => n,
        None => Input::new()
            .with_prompt("Token name")
            .with_initial_text("CLI")
            .interact_text()?,
    };

    let token_value = generate_token();

    println!("{}", "Token details:".bright_white().bold());
    println!("  User:  {}", user.name.cyan());
    println!("  Name:  {}", token_name.cyan());
    println!("  Token: {}", token_value.bright_yellow().bold());
    println!();
    println!(
        "{}",
        "⚠️  IMPORTANT: Save this token now! You won't be able to see it again."
            .red()
            .bold()
    );
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this token?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let token_hash = hash_token(&secret, &token_value);

    repo.create_token(user.id, &token_name, &token_hash)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create token: {}", e))?;

    let base_url =
        std::env::var("BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());

    println!("{}", "✅ Token created successfully!".green().bold());
    println!();
    println!("{}", "Example:".bright_white());
    println!(
        "  curl -H \"Authorization: Bearer {}\" {}/api/urls",
        token_value.bright_yellow(),
        base_url.trim_end_matches('/')
    );
    println!();

    Ok(())
}

/// Lists all API tokens with status indicators.
///
/// # Output Format
///
/// ```text
/// 📋 API Tokens
///
///   ID  User   Name                           Created              Status
///   ───────────────────────────────────────────────────────────────────────
///   1   1      CLI                            2024-01-15 10:30     ACTIVE
///   2   1      Mobile App                     2024-01-16 14:20     REVOKED
/// ```
async fn list_tokens(repo: &PgTokenRepository) -> Result<()> {
    println!("{}", "📋 API Tokens".bright_blue().bold());
    println!();

    let tokens = repo
        .list_tokens()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list tokens: {}", e))?;

    if tokens.is_empty() {
        println!("{}", "  No tokens found".yellow());
        println!();
        println!(
            "  Create one with: {} admin token create --user <name>",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<3} {:<6} {:<30} {:<20} {:<10}",
        "ID".bright_white().bold(),
        "User".bright_white().bold(),
        "Name".bright_white().bold(),
        "Created".bright_white().bold(),
        "Status".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for token in &tokens {
        let status = if token.is_revoked() {
            "REVOKED".red()
        } else {
            "ACTIVE".green()
        };

        println!(
            "  {:<3} {:<6} {:<30} {:<20} {}",
            token.id.to_string().bright_black(),
            token.user_id.to_string().bright_black(),
            token.name.cyan(),
            token
                .created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            status
        );
    }

    println!();
    println!(
        "  Total: {}",
        tokens.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Revokes a resolved token after confirmation. Confirmation defaults to No.
async fn revoke_token(repo: &PgTokenRepository, token: ApiToken) -> Result<()> {
    println!("{}", "🔒 Revoke API Token".bright_blue().bold());
    println!();

    if token.is_revoked() {
        println!("{}", "⚠️  This token is already revoked".yellow());
        return Ok(());
    }

    println!("  Token: {}", token.name.cyan());
    println!("  User:  {}", token.user_id.to_string().bright_black());
    println!("  ID:    {}", token.id.to_string().bright_black());
    println!();

    let confirmed = Confirm::new()
        .with_prompt("Revoke this token?")
        .default(false)
        .interact()?;

    if !confirmed {
        println!("{}", "❌ Cancelled".red());
        return Ok(());
    }

    repo.revoke_token(token.id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to revoke token: {}", e))?;

    println!("{}", "✅ Token revoked successfully!".green().bold());
    println!();

    Ok(())
}

/// Dispatches link inspection commands.
async fn handle_urls_action(action: UrlsAction, pool: Arc<PgPool>) -> Result<()> {
    match action {
        UrlsAction::List { user } => {
            let user = require_user(pool.clone(), &user).await?;
            let records = PgUrlRepository::new(pool)
                .list_by_owner(user.owner_id())
                .await
                .map_err(|e| anyhow::anyhow!("Failed to list links: {}", e))?;

            println!(
                "{} {}",
                "🔗 Links of".bright_blue().bold(),
                user.name.cyan().bold()
            );
            println!();

            if records.is_empty() {
                println!("{}", "  No links found".yellow());
                return Ok(());
            }

            for record in &records {
                println!(
                    "  {:<12} {}",
                    record.short_code().bright_yellow(),
                    record.url
                );
            }

            println!();
            println!(
                "  Total: {}",
                records.len().to_string().bright_white().bold()
            );
            println!();
        }
    }

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: Arc<PgPool>) -> Result<()> {
    let pool = pool.as_ref();

    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            let urls_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM urls")
                .fetch_one(pool)
                .await?;

            let users_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
                .fetch_one(pool)
                .await?;

            let tokens_count: i64 =
                sqlx::query_scalar("SELECT COUNT(*) FROM api_tokens WHERE revoked_at IS NULL")
                    .fetch_one(pool)
                    .await?;

            println!("  PostgreSQL:    {}", version.bright_white());
            println!(
                "  Links:         {}",
                urls_count.to_string().bright_green().bold()
            );
            println!(
                "  Users:         {}",
                users_count.to_string().bright_green().bold()
            );
            println!(
                "  Active tokens: {}",
                tokens_count.to_string().bright_green().bold()
            );
            println!();
        }
    }

    Ok(())
}

/// Generates a cryptographically random token.
///
/// # Format
///
/// - Length: 48 characters
/// - Character set: A-Z, a-z, 0-9
/// - Entropy: ~286 bits
fn generate_token() -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
    const TOKEN_LEN: usize = 48;

    let mut rng = rand::rng();

    (0..TOKEN_LEN)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_commands_parse() {
        let cli = Cli::try_parse_from(["admin", "db", "check"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Db {
                action: DbAction::Check
            }
        ));

        let cli = Cli::try_parse_from(["admin", "db", "info"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Db {
                action: DbAction::Info
            }
        ));
    }

    #[test]
    fn test_revoke_by_name_takes_user() {
        let cli = Cli::try_parse_from(["admin", "token", "revoke", "--user", "alice", "CLI"])
            .unwrap();

        match cli.command {
            Commands::Token {
                action: TokenAction::Revoke { user, name_or_id },
            } => {
                assert_eq!(user.as_deref(), Some("alice"));
                assert_eq!(name_or_id, "CLI");
            }
            _ => panic!("expected token revoke"),
        }
    }

    #[test]
    fn test_revoke_by_id_needs_no_user() {
        let cli = Cli::try_parse_from(["admin", "token", "revoke", "7"]).unwrap();

        match cli.command {
            Commands::Token {
                action: TokenAction::Revoke { user, name_or_id },
            } => {
                assert!(user.is_none());
                assert_eq!(name_or_id.parse::<i64>().unwrap(), 7);
            }
            _ => panic!("expected token revoke"),
        }
    }

    #[test]
    fn test_encode_accepts_negative_argument() {
        let cli = Cli::try_parse_from(["admin", "code", "encode", "-1"]).unwrap();

        match cli.command {
            Commands::Code {
                action: CodeAction::Encode { id },
            } => assert_eq!(id, -1),
            _ => panic!("expected code encode"),
        }
    }

    #[test]
    fn test_code_action_results() {
        assert!(handle_code_action(CodeAction::Encode { id: 100 }).is_ok());
        assert!(handle_code_action(CodeAction::Encode { id: -1 }).is_err());
        assert!(handle_code_action(CodeAction::Decode { code: "1C".into() }).is_ok());
        assert!(handle_code_action(CodeAction::Decode { code: "a-b".into() }).is_err());
    }

    #[test]
    fn test_generate_token_format() {
        let token = generate_token();

        assert_eq!(token.len(), 48);
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(token, generate_token());
    }
}
