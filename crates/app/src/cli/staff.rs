use bengkel_app::{
    context::AppContext,
    domain::staff::{DEFAULT_STAFF_ROLE, NewStaff, StaffId, StaffUpdate},
};
use clap::{Args, Subcommand};

use crate::cli::{failed, or_dash};

#[derive(Debug, Args)]
pub(crate) struct StaffCommand {
    #[command(subcommand)]
    command: StaffSubcommand,
}

#[derive(Debug, Subcommand)]
enum StaffSubcommand {
    /// List staff accounts
    List,

    /// Register a staff account
    Register(RegisterArgs),

    /// Change a staff account
    Update(UpdateArgs),

    /// Remove a staff account
    Delete {
        /// Staff ID
        id: StaffId,
    },
}

#[derive(Debug, Args)]
struct RegisterArgs {
    /// Full name
    #[arg(long)]
    name: String,

    /// Login email
    #[arg(long)]
    email: String,

    /// Initial password
    #[arg(long, env = "BENGKEL_STAFF_PASSWORD", hide_env_values = true)]
    password: String,

    /// Role (staff, kasir, admin)
    #[arg(long, default_value = DEFAULT_STAFF_ROLE)]
    role: String,

    /// Phone number
    #[arg(long)]
    phone: Option<String>,
}

#[derive(Debug, Args)]
struct UpdateArgs {
    /// Staff ID
    id: StaffId,

    #[arg(long)]
    name: Option<String>,

    #[arg(long)]
    email: Option<String>,

    #[arg(long)]
    role: Option<String>,

    #[arg(long)]
    phone: Option<String>,
}

pub(crate) async fn run(context: &AppContext, command: StaffCommand) -> Result<(), String> {
    match command.command {
        StaffSubcommand::List => {
            let staff = context
                .staff
                .list_staff()
                .await
                .map_err(|error| failed("list staff", &error))?;

            for member in &staff {
                println!(
                    "{}\t{}\t{}\t{}\t{}",
                    member.id,
                    member.name,
                    member.email,
                    member.role,
                    or_dash(member.phone.as_deref())
                );
            }
        }
        StaffSubcommand::Register(args) => {
            let member = context
                .staff
                .register_staff(NewStaff {
                    name: args.name,
                    email: args.email,
                    password: args.password,
                    role: args.role,
                    phone: args.phone,
                })
                .await
                .map_err(|error| failed("register staff", &error))?;

            println!("registered {} as {} (id {})", member.name, member.role, member.id);
        }
        StaffSubcommand::Update(args) => {
            let member = context
                .staff
                .update_staff(
                    args.id,
                    StaffUpdate {
                        name: args.name,
                        email: args.email,
                        role: args.role,
                        phone: args.phone,
                    },
                )
                .await
                .map_err(|error| failed("update staff", &error))?;

            println!("updated {} ({})", member.name, member.role);
        }
        StaffSubcommand::Delete { id } => {
            context
                .staff
                .delete_staff(id)
                .await
                .map_err(|error| failed("remove staff", &error))?;

            println!("removed staff {id}");
        }
    }

    Ok(())
}
