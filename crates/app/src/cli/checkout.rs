use bengkel::checkout::{CheckoutForm, PaymentMethod, ShippingMethod};
use bengkel_app::{
    context::AppContext,
    domain::{carts::load_cart, checkout::Checkout},
};
use clap::{Args, Subcommand};

use crate::cli::{cart::SelectionArgs, failed, money};

#[derive(Debug, Args)]
pub(crate) struct CheckoutCommand {
    #[command(subcommand)]
    command: CheckoutSubcommand,
}

#[derive(Debug, Subcommand)]
enum CheckoutSubcommand {
    /// Hand the chosen cart lines over to checkout
    Begin(SelectionArgs),

    /// Price the handed-off items with a shipping option
    Summary {
        /// Shipping option (reguler, express)
        #[arg(long, default_value = "reguler")]
        shipping: ShippingMethod,
    },

    /// Place the order
    Submit(SubmitArgs),
}

#[derive(Debug, Args)]
struct SubmitArgs {
    /// Recipient name
    #[arg(long)]
    recipient: String,

    /// Recipient phone number
    #[arg(long)]
    phone: String,

    /// Delivery address
    #[arg(long)]
    address: String,

    /// Shipping option (reguler, express)
    #[arg(long, default_value = "reguler")]
    shipping: ShippingMethod,

    /// Payment option (bank_transfer, cod, ewallet)
    #[arg(long, default_value = "bank_transfer")]
    payment: PaymentMethod,

    /// Bank, required for bank transfer
    #[arg(long)]
    bank: Option<String>,

    /// Note to the shop
    #[arg(long)]
    notes: Option<String>,
}

pub(crate) async fn run(context: &AppContext, command: CheckoutCommand) -> Result<(), String> {
    match command.command {
        CheckoutSubcommand::Begin(selection) => {
            let mut cart = load_cart(context.cart.as_ref())
                .await
                .map_err(|error| failed("load cart", &error))?;

            selection.apply(&mut cart)?;

            let items = context
                .checkout
                .begin(&cart)
                .map_err(|error| failed("start checkout", &error))?;

            println!("{} item(s) ready for checkout", items.len());
        }
        CheckoutSubcommand::Summary { shipping } => {
            let summary = context
                .checkout
                .summary(shipping)
                .map_err(|error| failed("load checkout", &error))?;

            for item in &summary.items {
                println!(
                    "product {}\t× {}\t{}",
                    item.product_id,
                    item.quantity,
                    money(&item.subtotal)
                );
            }

            println!("subtotal: {}", money(&summary.totals.subtotal));
            println!("shipping ({shipping}): {}", money(&summary.totals.shipping_cost));
            println!("total: {}", money(&summary.totals.total));
        }
        CheckoutSubcommand::Submit(args) => {
            let order = context
                .checkout
                .submit(CheckoutForm {
                    recipient_name: args.recipient,
                    phone: args.phone,
                    address: args.address,
                    shipping: args.shipping,
                    payment: args.payment,
                    bank: args.bank,
                    notes: args.notes,
                })
                .await
                .map_err(|error| failed("place order", &error))?;

            println!("order {} placed, total {}", order.id, money(&order.total));
            println!("track it at {}", Checkout::confirmation_path(order.id));
        }
    }

    Ok(())
}
