use bengkel_app::{
    context::AppContext,
    domain::auth::{Credentials, NewAccount},
    session::SessionUser,
};
use clap::{Args, Subcommand};

use crate::cli::{failed, or_dash};

#[derive(Debug, Args)]
pub(crate) struct AuthCommand {
    #[command(subcommand)]
    command: AuthSubcommand,
}

#[derive(Debug, Subcommand)]
enum AuthSubcommand {
    /// Sign in and keep the session for later commands
    Login(LoginArgs),

    /// Create a customer account
    Register(RegisterArgs),

    /// Sign out here and on the server
    Logout,

    /// Show the signed-in user
    Whoami,
}

#[derive(Debug, Args)]
struct LoginArgs {
    /// Account email
    #[arg(long)]
    email: String,

    /// Account password
    #[arg(long, env = "BENGKEL_PASSWORD", hide_env_values = true)]
    password: String,
}

#[derive(Debug, Args)]
struct RegisterArgs {
    /// Full name
    #[arg(long)]
    name: String,

    /// Account email
    #[arg(long)]
    email: String,

    /// Phone number
    #[arg(long)]
    phone: Option<String>,

    /// Account password
    #[arg(long, env = "BENGKEL_PASSWORD", hide_env_values = true)]
    password: String,

    /// Password again
    #[arg(long)]
    password_confirmation: String,
}

pub(crate) async fn run(context: &AppContext, command: AuthCommand) -> Result<(), String> {
    match command.command {
        AuthSubcommand::Login(args) => {
            let user = context
                .auth
                .login(Credentials {
                    email: args.email,
                    password: args.password,
                })
                .await
                .map_err(|error| failed("sign in", &error))?;

            println!("signed in as {} <{}>", user.name, user.email);
        }
        AuthSubcommand::Register(args) => {
            let user = context
                .auth
                .register(NewAccount {
                    name: args.name,
                    email: args.email,
                    phone: args.phone,
                    password: args.password,
                    password_confirmation: args.password_confirmation,
                })
                .await
                .map_err(|error| failed("register", &error))?;

            println!("registered {} <{}>", user.name, user.email);

            let signed_in = context
                .session
                .is_authenticated()
                .map_err(|error| format!("failed to read session: {error}"))?;

            if !signed_in {
                println!("sign in with `bengkel auth login` to continue");
            }
        }
        AuthSubcommand::Logout => {
            context
                .auth
                .logout()
                .await
                .map_err(|error| failed("sign out", &error))?;

            println!("signed out");
        }
        AuthSubcommand::Whoami => {
            let user = context
                .auth
                .profile()
                .await
                .map_err(|error| failed("load profile", &error))?;

            print_user(&user);
        }
    }

    Ok(())
}

fn print_user(user: &SessionUser) {
    println!("id: {}", user.id);
    println!("name: {}", user.name);
    println!("email: {}", user.email);
    println!("role: {}", or_dash(user.role.as_deref()));
}
