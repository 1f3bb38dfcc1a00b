//! Category listing.

use anyhow::Result;
use shop_commerce::catalog::category_label;

use super::products::report_failures;
use crate::context::Context;

/// Run the categories command.
pub async fn run(ctx: &Context) -> Result<()> {
    let spinner = ctx.output.spinner("Loading categories...");
    let fetched = ctx.catalog()?.get_categories().await;
    spinner.finish_and_clear();

    report_failures(&ctx.output, fetched.failures());

    if ctx.output.is_json() {
        ctx.output.json(fetched.value());
        return Ok(());
    }

    ctx.output.header("Categories");
    if fetched.value().is_empty() {
        ctx.output.info("No categories");
        return Ok(());
    }
    for category in fetched.value() {
        ctx.output.list_item(&format!("{} ({})", category_label(category), category));
    }

    Ok(())
}
