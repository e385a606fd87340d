// server/src/main.rs

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::sync::oneshot;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use models::role::Role;
use models::user::NewUser;
use rest_api::AppState;
use security::{register_user, JwtKeys};
use storage::db::ClinicDb;
use storage::users::UserStore;

mod config;

use config::load_server_config;

#[derive(Parser, Debug)]
#[command(name = "clinic-server")]
#[command(version)]
#[command(about = "Clinic management REST service")]
struct CliArgs {
    /// Path to the YAML configuration file.
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    config: Option<PathBuf>,
    /// Overrides the configured listen port.
    #[arg(short = 'p', long = "port", value_name = "PORT")]
    port: Option<u16>,
    /// Secret used to sign session tokens.
    #[arg(long = "jwt-secret", env = "CLINIC_JWT_SECRET", hide_env_values = true)]
    jwt_secret: String,
    /// Username for the bootstrap admin account.
    #[arg(
        long = "admin-username",
        env = "CLINIC_ADMIN_USERNAME",
        default_value = "admin"
    )]
    admin_username: String,
    /// Phone for the bootstrap admin account.
    #[arg(long = "admin-phone", env = "CLINIC_ADMIN_PHONE")]
    admin_phone: Option<String>,
    /// Password for the bootstrap admin account.
    #[arg(long = "admin-password", env = "CLINIC_ADMIN_PASSWORD", hide_env_values = true)]
    admin_password: Option<String>,
}

/// Creates the first admin account when the user store is empty. Without
/// one, nobody can log in and nobody can create accounts.
async fn seed_admin(db: &ClinicDb, args: &CliArgs) -> Result<()> {
    if !db.users.list_users().await?.is_empty() {
        return Ok(());
    }
    match (&args.admin_phone, &args.admin_password) {
        (Some(phone), Some(password)) => {
            let admin = register_user(
                NewUser {
                    username: args.admin_username.clone(),
                    password: password.clone(),
                    role: Role::Admin,
                    phone: phone.clone(),
                },
                &db.users,
            )
            .await?;
            info!(username = %admin.username, "seeded bootstrap admin account");
        }
        _ => {
            warn!("no accounts exist and no admin credentials were supplied; logins will fail");
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = CliArgs::parse();
    let mut config = load_server_config(args.config.clone())?;
    if let Some(port) = args.port {
        config.port = port;
    }

    let db = Arc::new(ClinicDb::open(Path::new(&config.data_directory))?);
    tokio::fs::create_dir_all(&config.upload_directory)
        .await
        .with_context(|| {
            format!(
                "failed to create upload directory {}",
                config.upload_directory
            )
        })?;
    seed_admin(&db, &args).await?;

    let state = AppState::new(
        db,
        JwtKeys::new(&args.jwt_secret),
        PathBuf::from(&config.upload_directory),
    );

    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("ctrl-c received, shutting down");
            let _ = shutdown_tx.send(());
        }
    });

    rest_api::start_server(config.port, state, shutdown_rx).await
}
