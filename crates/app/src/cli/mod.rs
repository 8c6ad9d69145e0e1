use std::fmt::Display;

use bengkel::money::{Rupiah, format_rupiah, from_non_negative_decimal};
use bengkel_app::{
    api::ApiError,
    config::ClientConfig,
    context::AppContext,
    logging,
};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

mod auth;
mod bookings;
mod cart;
mod cashier;
mod checkout;
mod orders;
mod products;
mod promotions;
mod reviews;
mod staff;

#[derive(Debug, Parser)]
#[command(name = "bengkel", about = "Bengkel storefront CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    config: ClientConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Auth(auth::AuthCommand),
    Products(products::ProductsCommand),
    Cart(cart::CartCommand),
    Checkout(checkout::CheckoutCommand),
    Orders(orders::OrdersCommand),
    Bookings(bookings::BookingsCommand),
    Promotions(promotions::PromotionsCommand),
    Staff(staff::StaffCommand),
    Reviews(reviews::ReviewsCommand),
    Cashier(cashier::CashierCommand),
}

impl Cli {
    /// Parse flags, with `.env` and the environment as fallbacks.
    pub(crate) fn load() -> Result<Self, clap::Error> {
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    pub(crate) async fn run(self) -> Result<(), String> {
        logging::init_subscriber(&self.config.logging)
            .map_err(|error| format!("failed to initialise logging: {error}"))?;

        let context = AppContext::from_config(&self.config)
            .map_err(|error| format!("failed to initialise client: {error}"))?;

        match self.command {
            Commands::Auth(command) => auth::run(&context, command).await,
            Commands::Products(command) => products::run(&context, command).await,
            Commands::Cart(command) => cart::run(&context, command).await,
            Commands::Checkout(command) => checkout::run(&context, command).await,
            Commands::Orders(command) => orders::run(&context, command).await,
            Commands::Bookings(command) => bookings::run(&context, command).await,
            Commands::Promotions(command) => promotions::run(&context, command).await,
            Commands::Staff(command) => staff::run(&context, command).await,
            Commands::Reviews(command) => reviews::run(&context, command).await,
            Commands::Cashier(command) => cashier::run(&context, command).await,
        }
    }
}

/// One-line failure message; session problems point at `auth login`.
pub(crate) fn failed(action: &str, error: &ApiError) -> String {
    if error.needs_login() {
        return format!("failed to {action}: {error}; run `bengkel auth login` first");
    }

    format!("failed to {action}: {error}")
}

/// Whole-rupiah amount typed on the command line.
pub(crate) fn amount(value: Decimal) -> Result<Rupiah, String> {
    from_non_negative_decimal(value).map_err(|error| format!("invalid amount {value}: {error}"))
}

pub(crate) fn money(amount: &Rupiah) -> String {
    format_rupiah(amount)
}

pub(crate) fn or_dash(value: Option<impl Display>) -> String {
    value.map_or_else(|| "-".to_string(), |value| value.to_string())
}

#[cfg(test)]
mod tests {
    use bengkel::money::rupiah;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn subcommands_parse_with_global_config() -> TestResult {
        let cli = Cli::try_parse_from([
            "bengkel",
            "--api-url",
            "http://localhost:8000/api",
            "cart",
            "show",
            "--item",
            "3",
            "--item",
            "4",
        ])?;

        assert_eq!(cli.config.api.api_url, "http://localhost:8000/api");
        assert!(matches!(cli.command, Commands::Cart(_)));

        Ok(())
    }

    #[test]
    fn session_failures_point_at_login() {
        let message = failed("load cart", &ApiError::AuthenticationRequired);

        assert!(message.starts_with("failed to load cart: "));
        assert!(message.ends_with("run `bengkel auth login` first"));
    }

    #[test]
    fn amounts_are_whole_rupiah() -> TestResult {
        assert_eq!(amount(Decimal::from(15_000))?, rupiah(15_000));
        assert!(amount(Decimal::from(-1)).is_err());

        Ok(())
    }
}
