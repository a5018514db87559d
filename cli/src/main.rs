mod session;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use storefront::api::http::HttpAuthApi;
use storefront::form::{LoginInputError, RegisterInputError, validate_login_input, validate_registration_input};
use storefront::{
    ApiError, AuthError, AuthMachine, AuthStore, ConfigError, EffectDispatcher, Notifier, TOKEN_KEY, Toast,
    ToastStatus, config::ApiConfig,
};

use crate::session::FileSessionStore;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("http client error: {0}")]
    Api(#[from] ApiError),
    #[error("{0}")]
    Auth(#[from] AuthError),
    #[error("{0}")]
    RegisterInput(#[from] RegisterInputError),
    #[error("{0}")]
    LoginInput(#[from] LoginInputError),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "storefront-cli", about = "Storefront account CLI")]
struct Cli {
    #[arg(long, env = "STOREFRONT_API_URL")]
    base_url: Option<String>,

    #[arg(long, env = "STOREFRONT_SESSION_FILE", default_value = ".storefront-session.json")]
    session_file: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in and store the session token.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Create an account.
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm_password: String,
        #[arg(long, default_value_t = false)]
        accept_policy: bool,
    },
    /// Forget the stored session token.
    Logout,
}

/// Prints toasts to stderr so stdout stays machine-readable.
struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn notify(&self, toast: Toast) {
        let tag = match toast.status {
            ToastStatus::Success => "ok",
            ToastStatus::Error => "error",
        };
        eprintln!("[{tag}] {}", toast.message);
    }
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = ApiConfig::from_vars(|key| match key {
        "STOREFRONT_API_URL" => cli.base_url.clone(),
        _ => std::env::var(key).ok(),
    })?;
    tracing::debug!(base_url = %config.base_url, session_file = %cli.session_file, "cli configured");

    let session = Arc::new(FileSessionStore::new(&cli.session_file));
    let api = HttpAuthApi::new(config)?.with_token(session.get_item(TOKEN_KEY));
    let effects = EffectDispatcher::new(session.clone(), Arc::new(StderrNotifier));
    let machine = AuthMachine::new(api, AuthStore::new(), effects);

    match cli.command {
        Command::Login { email, password } => run_login(&machine, &email, &password).await,
        Command::Register { email, name, password, confirm_password, accept_policy } => {
            let registration =
                validate_registration_input(&email, &name, &password, &confirm_password, accept_policy)?;
            let navigate = |path: &str| tracing::info!(%path, "registration complete; sign in next");
            let user = machine.register_user(registration, &navigate).await?;
            print_json(&user)
        }
        Command::Logout => {
            machine.logout().await;
            println!("signed out; token removed from {}", session.path().display());
            Ok(())
        }
    }
}

async fn run_login(machine: &AuthMachine<HttpAuthApi>, email: &str, password: &str) -> Result<(), CliError> {
    let credentials = validate_login_input(email, password)?;
    let success = machine.login_with_email(&credentials.email, &credentials.password).await?;
    print_json(&success.user)
}

fn print_json(value: &impl serde::Serialize) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
