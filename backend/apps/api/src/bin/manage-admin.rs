//! Admin Credential Management
//!
//! Operator tool to bootstrap the single admin account, rotate its
//! password, and generate a `JWT_SECRET`.

use std::io;
use std::sync::Arc;

use anyhow::{Context, bail};
use api::DEFAULT_LOG_FILTER;
use auth::application::{ManageAdminUseCase, PasswordChange};
use auth::{AuthConfig, PgAdminRepository};
use clap::{Parser, Subcommand};
use platform::password::ClearTextPassword;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "manage-admin", version, about = "Manage the portfolio admin account")]
struct Cli {
    /// Database connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true, global = true)]
    database_url: Option<String>,

    /// Optional password pepper, must match the server's
    #[arg(long, env = "PASSWORD_PEPPER", hide_env_values = true, global = true)]
    password_pepper: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create the admin account; refused if one already exists
    Create {
        #[arg(long, default_value = "admin")]
        username: String,
    },
    /// Change the admin password; creates the account only if none exists
    SetPassword {
        #[arg(long, default_value = "admin")]
        username: String,
    },
    /// Print a random value suitable for JWT_SECRET
    GenerateSecret,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    let username = match &cli.command {
        Command::GenerateSecret => {
            println!("{}", platform::crypto::generate_secret_b64());
            return Ok(());
        }
        Command::Create { username } | Command::SetPassword { username } => username.clone(),
    };

    let database_url = cli
        .database_url
        .as_deref()
        .context("DATABASE_URL must be set (or pass --database-url)")?;

    let password = read_password(std::env::var("ADMIN_PASSWORD").ok(), |prompt| {
        rpassword::prompt_password(prompt)
    })?;

    let config = AuthConfig {
        password_pepper: cli.password_pepper.map(String::into_bytes),
        ..AuthConfig::development()
    };

    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(database_url)
        .await?;

    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    let use_case = ManageAdminUseCase::new(
        Arc::new(PgAdminRepository::new(pool)),
        Arc::new(config),
    );

    match cli.command {
        Command::Create { .. } => {
            let admin = use_case.create(&username, password).await?;
            println!("Admin {} created", admin.admin_name);
        }
        Command::SetPassword { .. } => match use_case.set_password(&username, password).await? {
            PasswordChange::Updated => println!("Password updated for {username}"),
            PasswordChange::Created => println!("Admin {username} created"),
        },
        Command::GenerateSecret => {}
    }

    Ok(())
}

/// Password from `ADMIN_PASSWORD` if set, otherwise prompted twice.
///
/// Prompted passwords are checked against the policy before going any
/// further so the operator can retry.
fn read_password<P>(from_env: Option<String>, mut prompt: P) -> anyhow::Result<String>
where
    P: FnMut(&str) -> io::Result<String>,
{
    if let Some(password) = from_env.filter(|p| !p.is_empty()) {
        return Ok(password);
    }

    for _ in 0..3 {
        let password = prompt("Admin password: ").context("Failed to read password")?;

        if let Err(e) = ClearTextPassword::new(password.clone()) {
            eprintln!("{e}");
            continue;
        }

        let confirm = prompt("Confirm password: ").context("Failed to read password")?;
        if password != confirm {
            eprintln!("Passwords don't match");
            continue;
        }

        return Ok(password);
    }

    bail!("No acceptable password entered")
}
