//! CLI command implementations.

pub mod cart;
pub mod categories;
pub mod config;
pub mod product;
pub mod products;

use clap::{Args, Subcommand};

/// Arguments for the products command.
#[derive(Args)]
pub struct ProductsArgs {
    /// Only show these categories (comma-separated).
    #[arg(short = 'C', long, value_delimiter = ',')]
    pub categories: Vec<String>,

    /// Sort order: default, price-asc, price-desc, name-asc, name-desc.
    #[arg(short, long)]
    pub sort: Option<String>,

    /// Listing state as a URL query string, e.g. "categories=jewelery&sort=price-asc".
    #[arg(short, long)]
    pub query: Option<String>,
}

/// Arguments for the product command.
#[derive(Args)]
pub struct ProductArgs {
    /// Product id.
    pub id: String,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show the cart (default).
    Show,
    /// Add one unit of a product.
    Add {
        /// Product id.
        id: String,
    },
    /// Remove a product line.
    Remove {
        /// Product id.
        id: String,
    },
    /// Increase a line's quantity by one.
    Inc {
        /// Product id.
        id: String,
    },
    /// Decrease a line's quantity by one, removing it at zero.
    Dec {
        /// Product id.
        id: String,
    },
    /// Empty the cart.
    Clear,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration.
    Show,
    /// Write a default shop.toml in the current directory.
    Init {
        /// Overwrite an existing file.
        #[arg(short, long)]
        force: bool,
    },
}
