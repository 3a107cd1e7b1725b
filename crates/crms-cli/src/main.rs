//! CRCRMS operator CLI

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crms_api::blob::LocalBlobStore;
use crms_api::db::PgStore;
use crms_core::{CoreError, NewAccount, RecordService, RecordStore, Role};
use std::sync::Arc;
use tracing::{error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "crms")]
#[command(about = "Criminal Records & Crime Reporting Management System operator tool")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// PostgreSQL connection string
    #[arg(long, global = true, env = "DATABASE_URL", default_value = "postgres://localhost/crcrms")]
    database_url: String,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending database migrations
    Migrate,

    /// Create an administrator account
    CreateAdmin {
        #[arg(short, long)]
        email: String,

        #[arg(short, long, env = "CRMS_ADMIN_PASSWORD")]
        password: String,

        #[arg(short = 'n', long, default_value = "System Administrator")]
        full_name: String,

        #[arg(short, long)]
        badge_number: Option<String>,
    },

    /// Create the demo accounts (one admin, two officers, two public users)
    SeedTestUsers,

    /// List accounts, optionally for one role (admin, officer, public)
    ListUsers {
        #[arg(short, long)]
        role: Option<Role>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set subscriber: {}", e);
    }

    let result = match cli.command {
        Commands::Migrate => cmd_migrate(&cli.database_url).await,
        Commands::CreateAdmin {
            email,
            password,
            full_name,
            badge_number,
        } => {
            let account = NewAccount {
                email,
                password,
                full_name,
                role: Role::Admin,
                badge_number,
                department: Some("Administration".to_string()),
                phone: None,
            };
            cmd_create_admin(&cli.database_url, account).await
        }
        Commands::SeedTestUsers => cmd_seed_test_users(&cli.database_url).await,
        Commands::ListUsers { role } => cmd_list_users(&cli.database_url, role).await,
    };

    if let Err(e) = result {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

async fn connect(database_url: &str) -> Result<PgStore> {
    PgStore::connect(database_url)
        .await
        .with_context(|| format!("cannot connect to {}", database_url))
}

/// Service for console commands. Nothing here touches evidence files, so
/// the blob store points at the default upload directory.
async fn service(database_url: &str) -> Result<RecordService> {
    let store = connect(database_url).await?;
    Ok(RecordService::new(
        Arc::new(store),
        Arc::new(LocalBlobStore::new("./data/evidence", "/files")),
    ))
}

async fn cmd_migrate(database_url: &str) -> Result<()> {
    let store = connect(database_url).await?;
    store.migrate().await.context("migration failed")?;
    info!("Database is up to date");
    Ok(())
}

async fn cmd_create_admin(database_url: &str, account: NewAccount) -> Result<()> {
    let service = service(database_url).await?;
    let profile = service
        .create_account(None, account)
        .await
        .context("cannot create admin")?;
    info!("Created admin {} ({})", profile.email, profile.id);
    Ok(())
}

fn test_users() -> Vec<NewAccount> {
    let user = |email: &str, name: &str, role: Role, phone: &str, dept: Option<&str>, badge: Option<&str>| {
        NewAccount {
            email: email.to_string(),
            password: "password123".to_string(),
            full_name: name.to_string(),
            role,
            badge_number: badge.map(str::to_string),
            department: dept.map(str::to_string),
            phone: Some(phone.to_string()),
        }
    };

    vec![
        user(
            "admin@crcrms.gov.gh",
            "System Administrator",
            Role::Admin,
            "+233 20 123 4567",
            Some("Administration"),
            Some("ADMIN-001"),
        ),
        user(
            "officer1@crcrms.gov.gh",
            "Officer Kwame Nkrumah",
            Role::Officer,
            "+233 24 234 5678",
            Some("Criminal Investigation"),
            Some("OFF-001"),
        ),
        user(
            "officer2@crcrms.gov.gh",
            "Officer Yaa Asantewaa",
            Role::Officer,
            "+233 26 345 6789",
            Some("Patrol Division"),
            Some("OFF-002"),
        ),
        user(
            "public1@example.com",
            "John Mensah",
            Role::Public,
            "+233 20 456 7890",
            None,
            None,
        ),
        user(
            "public2@example.com",
            "Grace Osei",
            Role::Public,
            "+233 24 567 8901",
            None,
            None,
        ),
    ]
}

/// Accounts that already exist are skipped.
async fn cmd_seed_test_users(database_url: &str) -> Result<()> {
    let service = service(database_url).await?;
    let mut created = 0;

    for account in test_users() {
        let email = account.email.clone();
        match service.create_account(None, account).await {
            Ok(profile) => {
                info!("Created {} {}", profile.role, profile.email);
                created += 1;
            }
            Err(CoreError::Conflict(_)) => warn!("{} already exists, skipping", email),
            Err(e) => return Err(e).with_context(|| format!("cannot create {}", email)),
        }
    }

    info!("Seeded {} test user(s); password for all is password123", created);
    Ok(())
}

async fn cmd_list_users(database_url: &str, role: Option<Role>) -> Result<()> {
    let store = connect(database_url).await?;
    let profiles = store.list_profiles(role).await?;

    println!("{:<38} {:<8} {:<32} {:<12} NAME", "ID", "ROLE", "EMAIL", "BADGE");
    for p in &profiles {
        println!(
            "{:<38} {:<8} {:<32} {:<12} {}",
            p.id,
            p.role.as_str(),
            p.email,
            p.badge_number.as_deref().unwrap_or("-"),
            p.full_name
        );
    }
    info!("{} account(s)", profiles.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_accounts_are_valid() {
        let users = test_users();
        assert_eq!(users.len(), 5);
        for account in users {
            assert!(account.normalized().is_ok());
        }
    }

    #[test]
    fn test_parse_list_users_role() {
        let cli = Cli::try_parse_from(["crms", "list-users", "--role", "officer"]).unwrap();
        match cli.command {
            Commands::ListUsers { role } => assert_eq!(role, Some(Role::Officer)),
            _ => panic!("wrong subcommand"),
        }
        assert!(Cli::try_parse_from(["crms", "list-users", "--role", "chief"]).is_err());
    }
}
