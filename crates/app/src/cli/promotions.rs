use bengkel::{
    products::ProductId,
    promotions::{Promotion, PromotionDiscount, PromotionId},
};
use bengkel_app::{context::AppContext, domain::promotions::PromotionDraft};
use clap::{Args, Subcommand};
use jiff::{Zoned, civil::Date};
use rust_decimal::Decimal;

use crate::cli::{failed, money};

#[derive(Debug, Args)]
pub(crate) struct PromotionsCommand {
    #[command(subcommand)]
    command: PromotionsSubcommand,
}

#[derive(Debug, Subcommand)]
enum PromotionsSubcommand {
    /// List promotions with the price of every covered product
    List {
        /// Price as of this date (YYYY-MM-DD); today when omitted
        #[arg(long)]
        on: Option<Date>,
    },

    /// Admin: start a promotion
    Create(DraftArgs),

    /// Admin: change a promotion
    Update {
        /// Promotion ID
        id: PromotionId,

        #[command(flatten)]
        draft: DraftArgs,
    },

    /// Admin: remove a promotion
    Delete {
        /// Promotion ID
        id: PromotionId,
    },
}

#[derive(Debug, Args)]
struct DraftArgs {
    /// Campaign name
    #[arg(long)]
    name: String,

    /// Discount type (percentage, fixed)
    #[arg(long = "type", value_name = "TYPE")]
    discount_type: String,

    /// Percent off, or rupiah off for fixed discounts
    #[arg(long)]
    value: Decimal,

    /// First day (YYYY-MM-DD)
    #[arg(long)]
    start: Date,

    /// Last day, inclusive (YYYY-MM-DD)
    #[arg(long)]
    end: Date,

    /// Save switched off
    #[arg(long)]
    inactive: bool,

    /// Covered product IDs
    #[arg(long = "product", value_name = "PRODUCT")]
    products: Vec<ProductId>,
}

impl DraftArgs {
    fn into_draft(self) -> Result<PromotionDraft, String> {
        let discount = PromotionDiscount::from_parts(&self.discount_type, self.value)
            .map_err(|error| format!("invalid discount: {error}"))?;

        Ok(PromotionDraft {
            name: self.name,
            discount,
            start_date: self.start,
            end_date: self.end,
            is_active: !self.inactive,
            product_ids: self.products,
        })
    }
}

pub(crate) async fn run(context: &AppContext, command: PromotionsCommand) -> Result<(), String> {
    match command.command {
        PromotionsSubcommand::List { on } => {
            let today = on.unwrap_or_else(|| Zoned::now().date());

            let promotions = context
                .promotions
                .list_promotions()
                .await
                .map_err(|error| failed("list promotions", &error))?;

            if promotions.is_empty() {
                println!("no promotions");
            }

            for promotion in &promotions {
                print_promotion(promotion, today)?;
            }
        }
        PromotionsSubcommand::Create(args) => {
            let promotion = context
                .promotions
                .create_promotion(args.into_draft()?)
                .await
                .map_err(|error| failed("create promotion", &error))?;

            println!("created promotion {} ({})", promotion.id, promotion.name);
        }
        PromotionsSubcommand::Update { id, draft } => {
            let promotion = context
                .promotions
                .update_promotion(id, draft.into_draft()?)
                .await
                .map_err(|error| failed("update promotion", &error))?;

            println!("updated promotion {} ({})", promotion.id, promotion.name);
        }
        PromotionsSubcommand::Delete { id } => {
            context
                .promotions
                .delete_promotion(id)
                .await
                .map_err(|error| failed("delete promotion", &error))?;

            println!("deleted promotion {id}");
        }
    }

    Ok(())
}

fn print_promotion(promotion: &Promotion, today: Date) -> Result<(), String> {
    let state = if promotion.is_running_on(today) {
        "running"
    } else {
        "not running"
    };

    let discount = match promotion.discount {
        PromotionDiscount::Fixed(amount) => format!("{} off", money(&amount)),
        PromotionDiscount::Percentage(points) => format!("{}% off", points.normalize()),
    };

    println!(
        "{}\t{}\t{discount}\t{} to {}\t{state}",
        promotion.id, promotion.name, promotion.start_date, promotion.end_date
    );

    let prices = promotion
        .resolved_prices(today)
        .map_err(|error| format!("failed to price promotion {}: {error}", promotion.id))?;

    for (product, resolved) in prices {
        println!(
            "  {}\t{} -> {} (-{}%)",
            product.name,
            money(&product.price),
            money(&resolved.final_price),
            resolved.discount_percent
        );
    }

    Ok(())
}
