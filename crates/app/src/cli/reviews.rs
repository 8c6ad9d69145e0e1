use bengkel::products::ProductId;
use bengkel_app::{
    context::AppContext,
    domain::reviews::{NewReview, average_rating},
};
use clap::{Args, Subcommand};

use crate::cli::{failed, or_dash};

#[derive(Debug, Args)]
pub(crate) struct ReviewsCommand {
    #[command(subcommand)]
    command: ReviewsSubcommand,
}

#[derive(Debug, Subcommand)]
enum ReviewsSubcommand {
    /// Reviews of a product with the average rating
    List {
        /// Product ID
        product: ProductId,
    },

    /// Rate a product
    Submit {
        /// Product ID
        product: ProductId,

        /// Stars, 1 to 5
        #[arg(long)]
        rating: u8,

        /// Comment
        #[arg(long)]
        comment: Option<String>,
    },
}

pub(crate) async fn run(context: &AppContext, command: ReviewsCommand) -> Result<(), String> {
    match command.command {
        ReviewsSubcommand::List { product } => {
            let reviews = context
                .reviews
                .product_reviews(product)
                .await
                .map_err(|error| failed("list reviews", &error))?;

            for review in &reviews {
                println!(
                    "{}★\t{}\t{}",
                    review.rating,
                    or_dash(review.author.as_deref()),
                    or_dash(review.comment.as_deref())
                );
            }

            match average_rating(&reviews) {
                Some(average) => println!("average: {average} from {} review(s)", reviews.len()),
                None => println!("no reviews yet"),
            }
        }
        ReviewsSubcommand::Submit {
            product,
            rating,
            comment,
        } => {
            let review = context
                .reviews
                .submit_review(NewReview {
                    product_id: product,
                    rating,
                    comment,
                })
                .await
                .map_err(|error| failed("submit review", &error))?;

            println!("review {} saved", review.id);
        }
    }

    Ok(())
}
