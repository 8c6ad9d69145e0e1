use bengkel::orders::OrderStatus;
use bengkel_app::{
    context::AppContext,
    domain::orders::{Order, OrderId},
};
use clap::{Args, Subcommand};

use crate::cli::{failed, money, or_dash};

#[derive(Debug, Args)]
pub(crate) struct OrdersCommand {
    #[command(subcommand)]
    command: OrdersSubcommand,
}

#[derive(Debug, Subcommand)]
enum OrdersSubcommand {
    /// List orders; admins see every order
    List,

    /// Show one order with its lines
    Show {
        /// Order ID
        id: OrderId,
    },

    /// Admin: move an order to its next status
    Advance {
        /// Order ID
        id: OrderId,
    },

    /// Admin: request a specific status
    Status {
        /// Order ID
        id: OrderId,

        /// Target status (pending, processing, shipped, completed)
        status: OrderStatus,
    },
}

pub(crate) async fn run(context: &AppContext, command: OrdersCommand) -> Result<(), String> {
    match command.command {
        OrdersSubcommand::List => {
            let orders = context
                .orders
                .list_orders()
                .await
                .map_err(|error| failed("list orders", &error))?;

            if orders.is_empty() {
                println!("no orders yet");
            }

            for order in &orders {
                println!(
                    "{}\t{}\t{}\t{}",
                    order.id,
                    order.status,
                    money(&order.total),
                    or_dash(order.placed_on)
                );
            }
        }
        OrdersSubcommand::Show { id } => {
            let order = context
                .orders
                .get_order(id)
                .await
                .map_err(|error| failed("load order", &error))?;

            print_order(&order);
        }
        OrdersSubcommand::Advance { id } => {
            let order = context
                .orders
                .get_order(id)
                .await
                .map_err(|error| failed("load order", &error))?;

            let Some(next) = order.status.next() else {
                return Err(format!("order {id} is already {}", order.status));
            };

            let updated = context
                .orders
                .request_status(id, next)
                .await
                .map_err(|error| failed("update order", &error))?;

            println!("order {} is now {}", updated.id, updated.status);
        }
        OrdersSubcommand::Status { id, status } => {
            let updated = context
                .orders
                .request_status(id, status)
                .await
                .map_err(|error| failed("update order", &error))?;

            println!("order {} is now {}", updated.id, updated.status);
        }
    }

    Ok(())
}

fn print_order(order: &Order) {
    println!("order: {}", order.id);
    println!("status: {}", order.status);
    println!("placed: {}", or_dash(order.placed_on));
    println!("recipient: {}", or_dash(order.recipient_name.as_deref()));
    println!("address: {}", or_dash(order.address.as_deref()));
    println!("shipping: {}", or_dash(order.shipping.as_deref()));
    println!("payment: {}", or_dash(order.payment.as_deref()));

    for line in &order.items {
        let product = line
            .product_name
            .clone()
            .or_else(|| line.product_id.map(|id| format!("product {id}")))
            .unwrap_or_else(|| "unknown product".to_string());

        println!("  {} × {product}\t{}", line.quantity, money(&line.subtotal));
    }

    println!("total: {}", money(&order.total));
}
