use crate::config::shop_config::DEFAULT_SHOP_CONFIG;
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "shopctl")]
#[command(about = "Synchronizes product data files with a store catalog")]
pub struct Cli {
    /// Path to the shop configuration file
    #[arg(short, long, default_value = DEFAULT_SHOP_CONFIG)]
    pub config: String,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Operate on products
    #[command(subcommand)]
    Products(ProductsCommand),
}

#[derive(Debug, Clone, Subcommand)]
pub enum ProductsCommand {
    /// Pushes all new products to the store
    Push,
    /// Returns the total number of products
    Count,
    /// Lists all products in the store
    List,
}
