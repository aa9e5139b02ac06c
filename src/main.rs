use clap::Parser;
use shopctl::adapters::BarProgress;
use shopctl::config::cli::{Command, ProductsCommand};
use shopctl::config::store::DEFAULT_ENV_FILE;
use shopctl::core::catalog;
use shopctl::core::CatalogClient;
use shopctl::utils::logger;
use shopctl::{
    Cli, LocalImageReader, LocalStorage, ShopConfig, ShopifyClient, StoreConfig, SyncEngine,
    SyncError, TypeStatus,
};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose);
    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = run(cli).await {
        tracing::error!("❌ {} (scope: {:?})", e, e.scope());
        eprintln!("❌ {}", e);
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: Cli) -> Result<(), SyncError> {
    let store = StoreConfig::load(DEFAULT_ENV_FILE)?;
    let client = ShopifyClient::new(store);

    match cli.command {
        Command::Products(ProductsCommand::Push) => push(&cli.config, client).await,
        Command::Products(ProductsCommand::Count) => {
            let count = client.count().await?;
            println!("Total number of products: {}", count);
            Ok(())
        }
        Command::Products(ProductsCommand::List) => {
            let total = catalog::for_each_page(&client, |products| {
                for product in products {
                    println!("{}\t{}", product.id, product.title);
                }
            })
            .await?;
            tracing::info!("📋 Listed {} products", total);
            Ok(())
        }
    }
}

async fn push(config_path: &str, client: ShopifyClient) -> Result<(), SyncError> {
    tracing::info!("📁 Loading configuration from: {}", config_path);
    let shop = ShopConfig::from_file(config_path)?;

    let engine = SyncEngine::new(
        client,
        LocalImageReader::default(),
        LocalStorage::default(),
        BarProgress::new(),
    );
    let report = engine.run(&shop).await?;

    for outcome in &report.outcomes {
        match &outcome.status {
            TypeStatus::Synced { groups, rows } => println!(
                "✅ {}: created {} products ({} variants)",
                outcome.product_type, groups, rows
            ),
            TypeStatus::Skipped => println!(
                "All \"{}\" products already exist in the store.",
                outcome.product_type
            ),
            TypeStatus::Failed { error } => eprintln!("❌ {}: {}", outcome.product_type, error),
        }
    }

    if report.has_failures() {
        std::process::exit(1);
    }
    Ok(())
}
