use bengkel::products::{Product, ProductId};
use bengkel_app::{context::AppContext, domain::products::ProductDraft};
use clap::{Args, Subcommand};
use rust_decimal::Decimal;

use crate::cli::{amount, failed, money, or_dash};

#[derive(Debug, Args)]
pub(crate) struct ProductsCommand {
    #[command(subcommand)]
    command: ProductsSubcommand,
}

#[derive(Debug, Subcommand)]
enum ProductsSubcommand {
    /// List the catalogue
    List,

    /// Search the catalogue by name
    Search {
        /// Search text; blank lists everything
        query: String,
    },

    /// Show one product
    Show {
        /// Product slug
        slug: String,
    },

    /// Admin: add a product
    Create(DraftArgs),

    /// Admin: change a product
    Update {
        /// Product ID
        id: ProductId,

        #[command(flatten)]
        draft: DraftArgs,
    },

    /// Admin: remove a product
    Delete {
        /// Product ID
        id: ProductId,
    },
}

#[derive(Debug, Args)]
struct DraftArgs {
    /// Product name
    #[arg(long)]
    name: String,

    /// Selling price in rupiah
    #[arg(long)]
    price: Decimal,

    /// Price before markdown, in rupiah
    #[arg(long)]
    original_price: Option<Decimal>,

    /// Units in stock
    #[arg(long, default_value_t = 0)]
    stock: u32,

    /// Category name
    #[arg(long)]
    category: String,

    /// Description
    #[arg(long)]
    description: Option<String>,
}

impl DraftArgs {
    fn into_draft(self) -> Result<ProductDraft, String> {
        Ok(ProductDraft {
            name: self.name,
            price: amount(self.price)?,
            original_price: self.original_price.map(amount).transpose()?,
            stock: self.stock,
            category: self.category,
            description: self.description,
        })
    }
}

pub(crate) async fn run(context: &AppContext, command: ProductsCommand) -> Result<(), String> {
    match command.command {
        ProductsSubcommand::List => {
            let products = context
                .products
                .list_products()
                .await
                .map_err(|error| failed("list products", &error))?;

            print_products(&products);
        }
        ProductsSubcommand::Search { query } => {
            let products = context
                .product_search
                .search(&query)
                .await
                .map_err(|error| failed("search products", &error))?
                .unwrap_or_default();

            print_products(&products);
        }
        ProductsSubcommand::Show { slug } => {
            let product = context
                .products
                .get_product(&slug)
                .await
                .map_err(|error| failed("load product", &error))?;

            println!("id: {}", product.id);
            println!("name: {}", product.name);
            println!("slug: {}", product.slug);
            println!("category: {}", product.category);
            println!("price: {}", price_label(&product));
            println!("stock: {}", or_dash(product.stock));
            println!("image: {}", or_dash(product.primary_image()));
        }
        ProductsSubcommand::Create(args) => {
            let product = context
                .products
                .create_product(args.into_draft()?)
                .await
                .map_err(|error| failed("create product", &error))?;

            println!("created product {} ({})", product.id, product.slug);
        }
        ProductsSubcommand::Update { id, draft } => {
            let product = context
                .products
                .update_product(id, draft.into_draft()?)
                .await
                .map_err(|error| failed("update product", &error))?;

            println!("updated product {} ({})", product.id, product.slug);
        }
        ProductsSubcommand::Delete { id } => {
            context
                .products
                .delete_product(id)
                .await
                .map_err(|error| failed("delete product", &error))?;

            println!("deleted product {id}");
        }
    }

    Ok(())
}

fn print_products(products: &[Product]) {
    if products.is_empty() {
        println!("no products found");
        return;
    }

    for product in products {
        println!(
            "{}\t{}\t{}\tstock {}",
            product.id,
            product.name,
            price_label(product),
            or_dash(product.stock)
        );
    }
}

fn price_label(product: &Product) -> String {
    match product.original_price {
        Some(original) if product.has_promotion() => format!(
            "{} (was {}, -{}%)",
            money(&product.price),
            money(&original),
            product.markdown_percent()
        ),
        _ => money(&product.price),
    }
}
