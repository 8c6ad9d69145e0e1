use std::str::FromStr;

use bengkel::{cashier::Sale, products::ProductId};
use bengkel_app::{context::AppContext, domain::transactions::record_sale};
use clap::{Args, Subcommand};
use rust_decimal::Decimal;

use crate::cli::{amount, failed, money, or_dash};

#[derive(Debug, Args)]
pub(crate) struct CashierCommand {
    #[command(subcommand)]
    command: CashierSubcommand,
}

#[derive(Debug, Subcommand)]
enum CashierSubcommand {
    /// Ring up a counter sale and record it
    Sell {
        /// Product and quantity as `ID` or `ID:QTY`; repeat per product
        #[arg(long = "item", value_name = "ID[:QTY]", required = true)]
        items: Vec<SaleItem>,

        /// Cash handed over, in rupiah
        #[arg(long)]
        tendered: Decimal,
    },

    /// Recorded sales
    History,
}

#[derive(Debug, Clone, Copy)]
struct SaleItem {
    product: ProductId,
    quantity: u32,
}

impl FromStr for SaleItem {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (product, quantity) = value.split_once(':').unwrap_or((value, "1"));

        Ok(Self {
            product: product
                .parse()
                .map_err(|error| format!("invalid product id {product:?}: {error}"))?,
            quantity: quantity
                .trim()
                .parse()
                .map_err(|error| format!("invalid quantity {quantity:?}: {error}"))?,
        })
    }
}

pub(crate) async fn run(context: &AppContext, command: CashierCommand) -> Result<(), String> {
    match command.command {
        CashierSubcommand::Sell { items, tendered } => {
            let catalogue = context
                .products
                .list_products()
                .await
                .map_err(|error| failed("load products", &error))?;

            let mut sale = Sale::new();

            for item in items {
                let product = catalogue
                    .iter()
                    .find(|product| product.id == item.product)
                    .ok_or_else(|| format!("product {} not found", item.product))?;

                sale.add(product, item.quantity)
                    .map_err(|error| format!("cannot add {}: {error}", product.name))?;
            }

            for line in sale.lines() {
                let total = line
                    .line_total()
                    .map_err(|error| format!("failed to total sale: {error}"))?;

                println!("{} × {}\t{}", line.quantity, line.name, money(&total));
            }

            let recorded = record_sale(context.transactions.as_ref(), sale, amount(tendered)?)
                .await
                .map_err(|error| failed("record sale", &error))?;

            println!("total: {}", money(&recorded.total));
            println!("paid: {}", money(&recorded.paid));
            println!("change: {}", money(&recorded.change));
        }
        CashierSubcommand::History => {
            let transactions = context
                .transactions
                .list_transactions()
                .await
                .map_err(|error| failed("list transactions", &error))?;

            for transaction in &transactions {
                println!(
                    "{}\t{}\t{}\tpaid {}\tchange {}",
                    transaction.id,
                    or_dash(transaction.recorded_on),
                    money(&transaction.total),
                    money(&transaction.paid),
                    money(&transaction.change)
                );
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn sale_items_default_to_one_unit() -> TestResult {
        let single: SaleItem = "7".parse()?;
        let several: SaleItem = "7:3".parse()?;

        assert_eq!((single.product, single.quantity), (ProductId::new(7), 1));
        assert_eq!(several.quantity, 3);
        assert!("seven:1".parse::<SaleItem>().is_err());

        Ok(())
    }
}
