// CLI module for administrative operations requiring server access

pub mod accounts;
pub mod bootstrap;
pub mod labs;

use clap::{Parser, Subcommand};

use crate::app_data::AppData;

/// Healthcard CLI for administrative operations
#[derive(Parser)]
#[command(name = "healthcard-backend")]
#[command(about = "Health card discount and authentication backend", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP server (default)
    Serve,

    /// Create the first super admin with a generated one-time password
    Bootstrap {
        #[arg(long)]
        email: String,
    },

    /// Register a lab, optionally with its own discount rate
    CreateLab {
        #[arg(long)]
        code: String,

        #[arg(long)]
        name: String,

        /// Percentage between 0 and 100
        #[arg(long)]
        discount_rate: Option<f64>,
    },

    /// Create an account with a generated password that must be changed on first login
    CreateAccount {
        /// admin, user or lab_staff
        #[arg(long)]
        account_type: String,

        #[arg(long)]
        email: String,

        /// super_admin, branch_admin, receptionist or user
        #[arg(long)]
        role: String,

        #[arg(long)]
        lab_id: Option<String>,
    },

    /// Deactivate an account; it can no longer log in or use existing tokens
    DeactivateAccount {
        /// admin, user or lab_staff
        #[arg(long)]
        account_type: String,

        #[arg(long)]
        id: String,
    },
}

impl Cli {
    pub fn is_serve(&self) -> bool {
        matches!(self.command, None | Some(Commands::Serve))
    }
}

/// Execute CLI command
///
/// Routes the parsed CLI command to the appropriate handler function.
/// `serve` is handled by `main` and is a no-op here.
pub async fn execute_command(cli: Cli, app_data: &AppData) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        None | Some(Commands::Serve) => {}
        Some(Commands::Bootstrap { email }) => {
            bootstrap::bootstrap_super_admin(app_data, &email).await?;
        }
        Some(Commands::CreateLab {
            code,
            name,
            discount_rate,
        }) => {
            labs::create_lab(app_data, &code, &name, discount_rate).await?;
        }
        Some(Commands::CreateAccount {
            account_type,
            email,
            role,
            lab_id,
        }) => {
            accounts::create_account(
                app_data,
                account_type.parse()?,
                &email,
                role.parse()?,
                lab_id,
            )
            .await?;
        }
        Some(Commands::DeactivateAccount { account_type, id }) => {
            accounts::deactivate_account(app_data, account_type.parse()?, &id).await?;
        }
    }

    Ok(())
}
