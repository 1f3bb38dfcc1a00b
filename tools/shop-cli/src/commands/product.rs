//! Product detail.

use anyhow::{Context as _, Result};
use shop_commerce::ProductId;

use super::products::report_failures;
use super::ProductArgs;
use crate::context::Context;

/// Run the product command.
pub async fn run(args: ProductArgs, ctx: &Context) -> Result<()> {
    let id: ProductId = args
        .id
        .parse()
        .with_context(|| format!("'{}' is not a product id", args.id))?;

    let spinner = ctx.output.spinner("Loading product...");
    let fetched = ctx.catalog()?.get_product_by_id(id).await;
    spinner.finish_and_clear();

    let (product, failures) = fetched.into_parts();
    let Some(product) = product else {
        if !failures.iter().all(|f| f.kind == shop_catalog::FailureKind::Empty) {
            report_failures(&ctx.output, &failures);
        }
        if ctx.output.is_json() {
            ctx.output.json(&serde_json::Value::Null);
        } else {
            ctx.output.warn("Product not found");
        }
        return Ok(());
    };

    if ctx.output.is_json() {
        ctx.output.json(&product);
        return Ok(());
    }

    ctx.output.header(&product.title);
    ctx.output.kv("id", &product.id.to_string());
    ctx.output.kv("price", &product.price.to_string());
    ctx.output.kv("category", &product.category_label());
    ctx.output.kv(
        "rating",
        &format!("{:.1} ({} reviews)", product.rating.rate, product.rating.count),
    );
    if !product.image.is_empty() {
        ctx.output.kv("image", &product.image);
    }
    if !product.description.is_empty() {
        println!();
        println!("{}", product.description);
    }

    Ok(())
}
