use bengkel_app::{
    context::AppContext,
    domain::bookings::{Booking, BookingId, BookingStatus, NewBooking},
};
use clap::{Args, Subcommand};
use jiff::civil::Date;

use crate::cli::failed;

#[derive(Debug, Args)]
pub(crate) struct BookingsCommand {
    #[command(subcommand)]
    command: BookingsSubcommand,
}

#[derive(Debug, Subcommand)]
enum BookingsSubcommand {
    /// Book a workshop service
    Create(CreateBookingArgs),

    /// Staff: list every booking
    List,

    /// Staff: change a booking's status
    Status {
        /// Booking ID
        id: BookingId,

        /// pending, confirmed, in_progress, completed or cancelled
        status: BookingStatus,
    },
}

#[derive(Debug, Args)]
struct CreateBookingArgs {
    /// Customer name
    #[arg(long)]
    name: String,

    /// Phone number
    #[arg(long)]
    phone: String,

    /// Motorcycle
    #[arg(long)]
    vehicle: String,

    /// Service wanted
    #[arg(long)]
    service: String,

    /// Service date (YYYY-MM-DD)
    #[arg(long)]
    date: Date,

    /// Extra notes
    #[arg(long)]
    notes: Option<String>,
}

pub(crate) async fn run(context: &AppContext, command: BookingsCommand) -> Result<(), String> {
    match command.command {
        BookingsSubcommand::Create(args) => {
            let booking = context
                .bookings
                .create_booking(NewBooking {
                    customer_name: args.name,
                    phone: args.phone,
                    vehicle: args.vehicle,
                    service: args.service,
                    date: args.date,
                    notes: args.notes,
                })
                .await
                .map_err(|error| failed("create booking", &error))?;

            println!("booking {} on {} is {}", booking.id, booking.date, booking.status);
        }
        BookingsSubcommand::List => {
            let bookings = context
                .bookings
                .manage_bookings()
                .await
                .map_err(|error| failed("list bookings", &error))?;

            if bookings.is_empty() {
                println!("no bookings");
            }

            bookings.iter().for_each(print_booking);
        }
        BookingsSubcommand::Status { id, status } => {
            let booking = context
                .bookings
                .update_status(id, status)
                .await
                .map_err(|error| failed("update booking", &error))?;

            println!("booking {} is now {}", booking.id, booking.status);
        }
    }

    Ok(())
}

fn print_booking(booking: &Booking) {
    println!(
        "{}\t{}\t{}\t{} ({})\t{}\t{}",
        booking.id,
        booking.date,
        booking.status,
        booking.customer_name,
        booking.phone,
        booking.vehicle,
        booking.service,
    );

    if let Some(notes) = &booking.notes {
        println!("\tnotes: {notes}");
    }
}
