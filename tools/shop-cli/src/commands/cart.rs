//! Cart commands.
//!
//! Every subcommand runs against the persisted cart, provided for the
//! duration of the command and reached through `use_cart`.

use anyhow::{bail, Context as _, Result};
use serde::Serialize;
use shop_commerce::cart::{provide_cart, use_cart, CartEvent, CartItem};
use shop_commerce::{Money, ProductId};

use super::{CartArgs, CartCommand};
use crate::context::Context;
use crate::output::{Output, Table};


/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.open_cart()?;
    let output = ctx.output.clone();
    store.subscribe(move |event: &CartEvent| announce(&output, event));
    let _scope = provide_cart(store);

    match args.command.unwrap_or(CartCommand::Show) {
        CartCommand::Show => {}
        CartCommand::Add { id } => add(parse_id(&id)?, ctx).await?,
        CartCommand::Remove { id } => {
            let id = parse_id(&id)?;
            if use_cart().borrow_mut().remove_from_cart(id).is_none() {
                ctx.output.warn(&format!("Product {} is not in the cart", id));
            }
        }
        CartCommand::Inc { id } => {
            let id = parse_id(&id)?;
            if !use_cart().borrow_mut().increase_qty(id) {
                ctx.output.warn(&format!("Product {} is not in the cart", id));
            }
        }
        CartCommand::Dec { id } => {
            let id = parse_id(&id)?;
            if !use_cart().borrow_mut().decrease_qty(id) {
                ctx.output.warn(&format!("Product {} is not in the cart", id));
            }
        }
        CartCommand::Clear => {
            use_cart().borrow_mut().clear_cart();
        }
    }

    show(ctx);
    Ok(())
}

async fn add(id: ProductId, ctx: &Context) -> Result<()> {
    let spinner = ctx.output.spinner("Looking up product...");
    let fetched = ctx.catalog()?.get_product_by_id(id).await;
    spinner.finish_and_clear();
    let Some(product) = fetched.into_value() else {
        bail!("Product not found: {}", id);
    };
    use_cart().borrow_mut().add_to_cart(&product);
    Ok(())
}

fn parse_id(raw: &str) -> Result<ProductId> {
    raw.parse()
        .with_context(|| format!("'{}' is not a product id", raw))
}

fn announce(output: &Output, event: &CartEvent) {
    match event {
        CartEvent::Added { title, .. } => output.success(&format!("{} {}", title, event.message())),
        _ => output.success(&capitalize(event.message())),
    }
}

fn capitalize(message: &str) -> String {
    let mut chars = message.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[derive(Serialize)]
struct CartSummary<'a> {
    items: &'a [CartItem],
    item_count: usize,
    unit_count: u64,
    #[serde(with = "shop_commerce::money::decimal")]
    total: Money,
}

fn show(ctx: &Context) {
    let cart = use_cart();
    let store = cart.borrow();

    if ctx.output.is_json() {
        ctx.output.json(&CartSummary {
            items: store.items(),
            item_count: store.item_count(),
            unit_count: store.unit_count(),
            total: store.get_total_price(),
        });
        return;
    }

    ctx.output.header("Cart");
    if store.is_empty() {
        ctx.output.info("Your cart is empty");
        return;
    }

    let mut table = Table::new()
        .amount("ID", 4)
        .text("TITLE", 40)
        .amount("PRICE", 10)
        .amount("QTY", 4)
        .amount("TOTAL", 10);
    for item in store.items() {
        table.row([
            item.id.to_string(),
            item.title.clone(),
            item.price.to_string(),
            item.quantity.to_string(),
            item.line_total().to_string(),
        ]);
    }
    ctx.output.table(&table);
    ctx.output.kv("items", &store.item_count().to_string());
    ctx.output.kv("total", &store.get_total_price().to_string());
}
