use clap::{Parser, Subcommand};
use lms_auth::client::{
    AuthApi, FileTokenStorage, HttpAuthApi, LoginForm, RegisterForm, SubmitOutcome, TokenStorage,
    DEFAULT_API_URL, TOKEN_KEY,
};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "lms-client", version, about = "Log in to or register with the LMS backend")]
struct Cli {
    /// Backend base URL
    #[arg(long, env = "LMS_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// File standing in for browser local storage
    #[arg(long, env = "LMS_STORAGE_PATH", default_value = ".lms_local_storage.json")]
    storage: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create an account
    Register {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, env = "LMS_PASSWORD", default_value = "")]
        password: String,
    },
    /// Log in and keep the issued token
    Login {
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, env = "LMS_PASSWORD", default_value = "")]
        password: String,
        /// Echo the password instead of masking it
        #[arg(long)]
        show_password: bool,
    },
    /// Show the profile for the stored token
    Whoami,
    /// Forget the stored token
    Logout,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("warn"));

    let cli = Cli::parse();
    let api = HttpAuthApi::new(&cli.api_url);
    let storage = FileTokenStorage::new(&cli.storage);

    match cli.command {
        Command::Register { name, email, password } => {
            let mut form = RegisterForm::new();
            form.set_name(name);
            form.set_email(email);
            form.set_password(password);

            let outcome = form.submit(&api).await;
            if let Some(error) = form.password_error() {
                eprintln!("Password: {}", error);
                return ExitCode::FAILURE;
            }
            render(outcome)
        }
        Command::Login { email, password, show_password } => {
            let mut form = LoginForm::new();
            form.set_email(email);
            form.set_password(password);
            if show_password {
                form.toggle_show_password();
            }

            println!("Email:    {}", form.email());
            println!("Password: {}", form.password_display());
            render(form.submit(&api, &storage).await)
        }
        Command::Whoami => whoami(&api, &storage).await,
        Command::Logout => match storage.remove_item(TOKEN_KEY) {
            Ok(()) => {
                println!("Logged out");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("{}", e);
                ExitCode::FAILURE
            }
        },
    }
}

fn render(outcome: SubmitOutcome) -> ExitCode {
    let mut code = ExitCode::SUCCESS;

    if let Some(alert) = &outcome.alert {
        if alert.icon == lms_auth::client::AlertIcon::Success {
            println!("{}", alert);
        } else {
            eprintln!("{}", alert);
            code = ExitCode::FAILURE;
        }
    }
    if let Some(route) = &outcome.redirect {
        println!("→ {}", route);
    }

    code
}

async fn whoami(api: &dyn AuthApi, storage: &dyn TokenStorage) -> ExitCode {
    let token = match storage.get_item(TOKEN_KEY) {
        Ok(Some(token)) => token,
        Ok(None) => {
            eprintln!("Not logged in");
            return ExitCode::FAILURE;
        }
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    match api.current_user(&token).await {
        Ok(user) => {
            println!("{} <{}>", user.name, user.email);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
