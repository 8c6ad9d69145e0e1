use bengkel::{
    cart::{Cart, CartItemId},
    products::ProductId,
};
use bengkel_app::{
    context::AppContext,
    domain::carts::{change_quantity, load_cart, remove_line},
};
use clap::{Args, Subcommand};

use crate::cli::{failed, money};

#[derive(Debug, Args)]
pub(crate) struct CartCommand {
    #[command(subcommand)]
    command: CartSubcommand,
}

#[derive(Debug, Subcommand)]
enum CartSubcommand {
    /// Show the cart with totals over the chosen lines
    Show(SelectionArgs),

    /// Add a product to the cart
    Add {
        /// Product ID
        product: ProductId,

        /// Units to add
        #[arg(long, default_value_t = 1)]
        quantity: u32,
    },

    /// Change a line's quantity
    Set {
        /// Cart item ID
        item: CartItemId,

        /// New quantity
        quantity: u32,
    },

    /// Remove a line
    Remove {
        /// Cart item ID
        item: CartItemId,
    },
}

/// Which cart lines count towards the totals.
#[derive(Debug, Args)]
pub(crate) struct SelectionArgs {
    /// Cart item IDs to select; every line when omitted
    #[arg(long = "item", value_name = "ITEM")]
    items: Vec<CartItemId>,
}

impl SelectionArgs {
    pub(crate) fn apply(&self, cart: &mut Cart) -> Result<(), String> {
        if self.items.is_empty() {
            cart.select_all();
            return Ok(());
        }

        for item in &self.items {
            cart.select(*item)
                .map_err(|error| format!("cannot select item {item}: {error}"))?;
        }

        Ok(())
    }
}

pub(crate) async fn run(context: &AppContext, command: CartCommand) -> Result<(), String> {
    match command.command {
        CartSubcommand::Show(selection) => {
            let mut cart = load_cart(context.cart.as_ref())
                .await
                .map_err(|error| failed("load cart", &error))?;

            selection.apply(&mut cart)?;
            print_cart(&cart)?;
        }
        CartSubcommand::Add { product, quantity } => {
            context
                .cart
                .add_item(product, quantity)
                .await
                .map_err(|error| failed("add to cart", &error))?;

            println!("added {quantity} × product {product} to the cart");
        }
        CartSubcommand::Set { item, quantity } => {
            let mut cart = load_cart(context.cart.as_ref())
                .await
                .map_err(|error| failed("load cart", &error))?;

            change_quantity(context.cart.as_ref(), &mut cart, item, quantity)
                .await
                .map_err(|error| failed("update quantity", &error))?;

            cart.select_all();
            print_cart(&cart)?;
        }
        CartSubcommand::Remove { item } => {
            let mut cart = load_cart(context.cart.as_ref())
                .await
                .map_err(|error| failed("load cart", &error))?;

            remove_line(context.cart.as_ref(), &mut cart, item)
                .await
                .map_err(|error| failed("remove item", &error))?;

            cart.select_all();
            print_cart(&cart)?;
        }
    }

    Ok(())
}

fn print_cart(cart: &Cart) -> Result<(), String> {
    if cart.is_empty() {
        println!("your cart is empty");
        return Ok(());
    }

    for line in cart.lines() {
        let total = line
            .line_total()
            .map_err(|error| format!("failed to total cart: {error}"))?;
        let marker = if cart.is_selected(line.id) { "[x]" } else { "[ ]" };

        println!(
            "{marker} {}\t{} × {}\t{}",
            line.id,
            line.quantity,
            line.product.name,
            money(&total)
        );
    }

    let totals = cart
        .totals()
        .map_err(|error| format!("failed to total cart: {error}"))?;

    println!("subtotal: {}", money(&totals.subtotal));
    println!("service fee: {}", money(&totals.service_fee));
    println!("total: {}", money(&totals.total));

    Ok(())
}

#[cfg(test)]
mod tests {
    use bengkel::{
        cart::CartLine,
        money::rupiah,
        products::{Product, ProductId},
    };
    use testresult::TestResult;

    use super::*;

    fn cart() -> TestResult<Cart> {
        let lines = [(1, "Oli Mesin", 45_000), (2, "Busi", 20_000)]
            .into_iter()
            .map(|(id, name, price)| {
                let product = Product {
                    id: ProductId::new(id),
                    name: name.to_string(),
                    slug: name.to_lowercase().replace(' ', "-"),
                    price: rupiah(price),
                    original_price: None,
                    stock: None,
                    category: "Sparepart".to_string(),
                    images: Vec::new(),
                };

                CartLine::new(CartItemId::new(id), product, 1)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Cart::new(lines))
    }

    #[test]
    fn repeated_items_stay_selected() -> TestResult {
        let mut cart = cart()?;
        let selection = SelectionArgs {
            items: vec![CartItemId::new(2), CartItemId::new(2)],
        };

        selection.apply(&mut cart)?;

        assert!(cart.is_selected(CartItemId::new(2)));
        assert!(!cart.is_selected(CartItemId::new(1)));
        assert_eq!(cart.totals()?.subtotal, rupiah(20_000));

        Ok(())
    }

    #[test]
    fn unknown_items_are_reported() -> TestResult {
        let mut cart = cart()?;
        let selection = SelectionArgs {
            items: vec![CartItemId::new(9)],
        };

        let Err(message) = selection.apply(&mut cart) else {
            return Err("selecting a missing line should fail".into());
        };

        assert!(message.starts_with("cannot select item 9"));

        Ok(())
    }

    #[test]
    fn no_items_selects_everything() -> TestResult {
        let mut cart = cart()?;

        SelectionArgs { items: Vec::new() }.apply(&mut cart)?;

        assert_eq!(cart.totals()?.subtotal, rupiah(65_000));

        Ok(())
    }
}
