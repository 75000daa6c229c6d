use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use tracing::debug;

use creditdesk::app::{handle_fatal_error, initialize_app, AppConfig};
use creditdesk::application::{use_applications, LoanPayload};
use creditdesk::error::{DeskError, ErrorCode};
use creditdesk::session::{use_session, RegistrationProfile};

/// Session and loan application desk
#[derive(Parser)]
#[command(name = "creditdesk")]
#[command(about = "Log in and submit loan applications", long_about = None)]
struct Cli {
    /// Enable verbose output (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to configuration file
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and remember the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Create an account and log in as it
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// 10-digit phone number
        #[arg(long)]
        phone: Option<String>,
    },
    /// Forget the stored session
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Submit one or more loan applications
    Apply {
        /// Application fields as a JSON object; repeat to submit several
        #[arg(long = "payload", required = true)]
        payloads: Vec<String>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let verbose = cli.verbose;

    if let Err(e) = run(cli).await {
        handle_fatal_error(e, verbose);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = AppConfig::new(cli.verbose).with_config_path(cli.config);
    let runtime = initialize_app(&config)?;

    runtime.scoped(execute(cli.command)).await
}

async fn execute(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Login { email, password } => {
            let user = use_session()?.login(&email, &password).await?;
            print_json(&user)
        }
        Commands::Register {
            name,
            email,
            password,
            phone,
        } => {
            let mut profile = RegistrationProfile::new(name, email, password);
            if let Some(phone) = phone {
                profile = profile.with_phone(phone);
            }
            let user = use_session()?.register(profile).await?;
            print_json(&user)
        }
        Commands::Logout => {
            use_session()?.logout();
            println!("Logged out");
            Ok(())
        }
        Commands::Whoami => {
            match use_session()?.current_user() {
                Some(user) => print_json(&user)?,
                None => println!("Not logged in"),
            }
            Ok(())
        }
        Commands::Apply { payloads } => {
            if !use_session()?.is_authenticated() {
                return Err(DeskError::authentication_with_code(
                    ErrorCode::SESSION_GENERIC,
                    "Please log in before applying",
                )
                .into());
            }

            let applications = use_applications()?;
            for (index, raw) in payloads.iter().enumerate() {
                let value = serde_json::from_str(raw)
                    .with_context(|| format!("Payload {} is not valid JSON", index + 1))?;
                let payload = LoanPayload::from_value(value)?;
                let application = applications.apply_for_loan(payload).await?;
                debug!(id = %application.id, "Application accepted");
            }

            print_json(&applications.history())
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
