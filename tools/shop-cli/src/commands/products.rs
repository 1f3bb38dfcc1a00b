//! Product listing.

use anyhow::Result;
use shop_catalog::{FetchFailure, ListingLoader};
use shop_commerce::catalog::{ListingQuery, Product, SortOption};

use super::ProductsArgs;
use crate::context::Context;
use crate::output::{Output, Table};


/// Run the products command.
pub async fn run(args: ProductsArgs, ctx: &Context) -> Result<()> {
    let query = listing_query(&args);
    ctx.output.debug(&format!("listing query: ?{}", query.to_query_string()));

    let loader = ListingLoader::new(ctx.catalog()?);
    let spinner = ctx.output.spinner("Loading products...");
    let listing = loader.load(&query).await;
    spinner.finish_and_clear();

    // Only one load is ever in flight here, so it is always current.
    let Some(listing) = listing else {
        return Ok(());
    };
    report_failures(&ctx.output, listing.failures());

    if ctx.output.is_json() {
        ctx.output.json(listing.value());
        return Ok(());
    }

    let products = listing.value();
    if query.has_filters() {
        ctx.output.header(&format!(
            "Products in {} ({})",
            query.categories().join(", "),
            query.sort().display_name()
        ));
    } else {
        ctx.output.header(&format!("Products ({})", query.sort().display_name()));
    }

    if products.is_empty() {
        ctx.output.info("No products");
        return Ok(());
    }

    print_table(&ctx.output, products);
    ctx.output.info(&format!("{} product(s)", products.len()));
    Ok(())
}

/// Merge `--query` with the explicit flags; flags win.
fn listing_query(args: &ProductsArgs) -> ListingQuery {
    let mut query = args
        .query
        .as_deref()
        .map(ListingQuery::from_query_string)
        .unwrap_or_default();

    if !args.categories.is_empty() {
        query = ListingQuery::new(args.categories.clone(), query.sort());
    }
    if let Some(sort) = &args.sort {
        query.set_sort(SortOption::parse(sort));
    }
    query
}

pub(crate) fn report_failures(output: &Output, failures: &[FetchFailure]) {
    for failure in failures {
        output.warn(&format!("Catalog unavailable: {}", failure));
    }
}

fn print_table(output: &Output, products: &[Product]) {
    let mut table = Table::new()
        .amount("ID", 4)
        .text("TITLE", 44)
        .text("CATEGORY", 18)
        .amount("PRICE", 10);
    for product in products {
        table.row([
            product.id.to_string(),
            product.title.clone(),
            product.category_label(),
            product.price.to_string(),
        ]);
    }
    output.table(&table);
}
