use clap::{Args, Parser, Subcommand};
use std::path::Path;
use std::sync::Arc;

use radshop::application::errors::{ShopError, StorageError};
use radshop::application::services::{CartLedger, CatalogView, FormController, Storefront};
use radshop::domain::traits::Store;
use radshop::infrastructure::adapters::console;
use radshop::infrastructure::api::HttpProductApi;
use radshop::infrastructure::config::{Config, StorageBackend};
use radshop::infrastructure::database::{SqliteStore, DB_FILE};
use radshop::infrastructure::storage::JsonStore;

#[derive(Parser)]
#[command(name = "radshop")]
#[command(about = "Storefront and product admin client", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "radshop.yaml")]
    config: String,

    /// Product API base URL (overrides config)
    #[arg(long)]
    base_url: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// List one page of products in a category
    Products {
        /// Category to show (defaults to the configured one)
        #[arg(long)]
        category: Option<String>,
        /// Zero-based page index
        #[arg(long, default_value_t = 0)]
        page: usize,
    },
    /// List distinct product categories
    Categories,
    /// Inspect or change the cart
    #[command(subcommand)]
    Cart(CartCommand),
    /// Print the invoice for the current cart
    Invoice,
    /// Create, edit or delete products
    #[command(subcommand)]
    Product(ProductCommand),
    /// Show version
    Version,
    /// Generate default config
    InitConfig,
}

#[derive(Subcommand)]
enum CartCommand {
    /// Show the cart table
    Show,
    /// Add a product, or bump its quantity
    Add { id: String },
    /// Increase quantity of a cart line
    Inc { id: String },
    /// Decrease quantity; a line at 1 is removed
    Dec { id: String },
    /// Remove a line
    Remove { id: String },
    /// Empty the cart
    Clear,
}

#[derive(Args)]
struct ProductFields {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    category: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    image: Option<String>,
}

#[derive(Subcommand)]
enum ProductCommand {
    /// Create a product (sent with the placeholder price)
    Add {
        #[command(flatten)]
        fields: ProductFields,
    },
    /// Edit fields of an existing product
    Edit {
        id: String,
        #[command(flatten)]
        fields: ProductFields,
    },
    /// Delete a product
    Delete { id: String },
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Version => {
            println!("radshop v{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::InitConfig => {
            init_config(&cli.config);
        }
        command => {
            let config = load_config(&cli.config, cli.base_url);
            let rt = match tokio::runtime::Runtime::new() {
                Ok(rt) => rt,
                Err(e) => {
                    tracing::error!("Failed to start runtime: {}", e);
                    std::process::exit(1);
                }
            };
            if let Err(e) = rt.block_on(run(command, config)) {
                tracing::error!("{}", e);
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    }
}

fn load_config(path: &str, base_url: Option<String>) -> Config {
    let mut config = if Path::new(path).exists() {
        match Config::load(path) {
            Ok(mut config) => {
                config.apply_env();
                config
            }
            Err(e) => {
                tracing::warn!("Failed to load config: {}, using defaults", e);
                Config::load_env()
            }
        }
    } else {
        Config::load_env()
    };
    if let Some(url) = base_url {
        config.api.base_url = url;
    }
    config
}

fn init_config(path: &str) {
    if Path::new(path).exists() {
        eprintln!("{} already exists", path);
        std::process::exit(1);
    }
    match Config::default().save(path) {
        Ok(()) => println!("Wrote default config to {}", path),
        Err(e) => {
            eprintln!("Failed to write config: {}", e);
            std::process::exit(1);
        }
    }
}

async fn open_store(config: &Config) -> Result<Arc<dyn Store>, StorageError> {
    let dir = &config.storage.data_dir;
    match config.storage.backend {
        StorageBackend::Json => {
            let store = JsonStore::new(dir);
            store.init().await?;
            Ok(Arc::new(store))
        }
        StorageBackend::Sqlite => {
            tokio::fs::create_dir_all(dir).await?;
            Ok(Arc::new(SqliteStore::new(dir.join(DB_FILE))?))
        }
    }
}

async fn build_storefront(config: &Config) -> Result<Storefront, ShopError> {
    let store = open_store(config).await?;
    let cart = match CartLedger::load(store.clone(), config.storage.cart_key.clone()).await {
        Ok(cart) => cart,
        Err(StorageError::Serialization(e)) => {
            tracing::warn!("Discarding unreadable cart: {}", e);
            CartLedger::new(store, config.storage.cart_key.clone())
        }
        Err(e) => return Err(e.into()),
    };

    let api = HttpProductApi::new(config.api.base_url.clone(), config.timeout())?
        .with_retry(config.retry_policy());
    tracing::info!("Using product API at {}", api.base_url());

    let catalog = CatalogView::new(config.catalog.default_category.clone(), config.catalog.page_size);
    let form = FormController::new(config.form.placeholder_price);

    Ok(Storefront::new(Arc::new(api), catalog, cart, form)
        .with_refresh_after_mutation(config.refresh_after_mutation))
}

async fn run(command: Commands, config: Config) -> Result<(), ShopError> {
    let mut shop = build_storefront(&config).await?;

    match command {
        Commands::Products { category, page } => {
            shop.refresh().await?;
            if let Some(category) = category {
                shop.catalog_mut().select_category(category);
            }
            shop.catalog_mut().set_page(page);
            print!("{}", console::render_catalog(shop.catalog()));
        }
        Commands::Categories => {
            shop.refresh().await?;
            for category in shop.catalog().categories() {
                println!("{}", category);
            }
        }
        Commands::Cart(cart_command) => run_cart(&mut shop, cart_command).await?,
        Commands::Invoice => {
            let number = format!("INV-{}", &uuid::Uuid::new_v4().simple().to_string()[..8]);
            print!("{}", console::render_invoice(shop.cart().cart(), &number, chrono::Utc::now()));
        }
        Commands::Product(product_command) => run_product(&mut shop, product_command).await?,
        Commands::Version | Commands::InitConfig => {}
    }
    Ok(())
}

async fn run_cart(shop: &mut Storefront, command: CartCommand) -> Result<(), ShopError> {
    let (changed, id) = match command {
        CartCommand::Show => (true, String::new()),
        CartCommand::Add { id } => {
            shop.refresh().await?;
            let qty = shop.add_to_cart(&id).await?;
            println!("{} x{}", id, qty);
            (true, id)
        }
        CartCommand::Inc { id } => (shop.increment(&id).await?, id),
        CartCommand::Dec { id } => (shop.decrement(&id).await?, id),
        CartCommand::Remove { id } => (shop.remove_from_cart(&id).await?, id),
        CartCommand::Clear => {
            shop.clear_cart().await?;
            (true, String::new())
        }
    };
    if !changed {
        println!("{} is not in the cart", id);
    }
    print!("{}", console::render_cart(shop.cart().cart()));
    Ok(())
}

fn apply_fields(form: &mut FormController, fields: ProductFields) {
    if let Some(name) = fields.name {
        form.set_name(name);
    }
    if let Some(category) = fields.category {
        form.set_category(category);
    }
    if let Some(description) = fields.description {
        form.set_description(description);
    }
    if let Some(image) = fields.image {
        form.set_image(image);
    }
}

async fn run_product(shop: &mut Storefront, command: ProductCommand) -> Result<(), ShopError> {
    match command {
        ProductCommand::Add { fields } => {
            apply_fields(shop.form_mut(), fields);
            print!("{}", console::render_form(shop.form()));
            shop.create_product().await?;
            println!("Product successfully added!");
        }
        ProductCommand::Edit { id, fields } => {
            shop.refresh().await?;
            shop.edit(&id)?;
            apply_fields(shop.form_mut(), fields);
            print!("{}", console::render_form(shop.form()));
            shop.update_product().await?;
            println!("Product successfully updated!");
        }
        ProductCommand::Delete { id } => {
            shop.refresh().await?;
            shop.delete_product(&id).await?;
            println!("Product successfully deleted!");
        }
    }
    Ok(())
}
