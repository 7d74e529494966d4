use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use org_store_core::{Customer, Order, Product, validate_state};
use org_store_migrate::{DEFAULT_STATE_PATH, MigrationRunner, MigrationState, run_all};
use org_store_sqlite::{InventoryQuery, OrgConnection, OrgStore};

#[derive(Debug, Parser)]
#[command(name = "store")]
#[command(about = "Per-org inventory management with schema migrations")]
struct Cli {
    /// Org whose database inventory commands operate on.
    #[arg(long, global = true, default_value = "default")]
    org: String,
    /// Directory holding the per-org database files.
    #[arg(long, global = true, default_value = ".")]
    data_dir: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run pending migrations for every org in the state file.
    RunMigrations(RunMigrationsArgs),
    /// Create a new customer with an email and two-letter state code.
    CreateCustomer(CreateCustomerArgs),
    /// Create a new product with a name, a price, and an optional SKU.
    CreateProduct(CreateProductArgs),
    /// Create a new order linking a product to a customer.
    CreateOrder(CreateOrderArgs),
    /// Show customers, with optional email and state filters.
    ShowCustomers(ShowCustomersArgs),
    /// Show products, with an optional name filter.
    ShowProducts(ShowProductsArgs),
    /// Show orders, with optional customer and product id filters.
    ShowOrders(ShowOrdersArgs),
}

#[derive(Debug, Args)]
struct RunMigrationsArgs {
    /// Directory of migration files named <name>_<id>.sql.
    #[arg(long, default_value = "migrations")]
    migrations: PathBuf,
    /// Path of the migration state file.
    #[arg(long, default_value = DEFAULT_STATE_PATH)]
    state: PathBuf,
}

#[derive(Debug, Args)]
struct CreateCustomerArgs {
    /// Customer email address.
    email: String,
    /// Two-letter US state or territory code.
    state: String,
}

#[derive(Debug, Args)]
struct CreateProductArgs {
    /// Product name.
    name: String,
    /// Unit price in dollars.
    price: f64,
    /// Stock-keeping unit code.
    #[arg(long)]
    sku: Option<String>,
}

#[derive(Debug, Args)]
struct CreateOrderArgs {
    /// Id of the ordered product.
    product_id: i64,
    /// Id of the ordering customer.
    customer_id: i64,
}

#[derive(Debug, Args)]
struct ShowCustomersArgs {
    /// Substring filter on email.
    #[arg(long, default_value = "")]
    email: String,
    /// Substring filter on state code.
    #[arg(long, default_value = "")]
    state: String,
}

#[derive(Debug, Args)]
struct ShowProductsArgs {
    /// Substring filter on product name.
    #[arg(long, default_value = "")]
    name: String,
}

#[derive(Debug, Args)]
struct ShowOrdersArgs {
    /// Only orders for this customer id.
    #[arg(long)]
    customer_id: Option<i64>,
    /// Only orders for this product id.
    #[arg(long)]
    product_id: Option<i64>,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::RunMigrations(args) => run_migrations(&cli.data_dir, args),
        Command::CreateCustomer(args) => run_create_customer(&cli.data_dir, &cli.org, args),
        Command::CreateProduct(args) => run_create_product(&cli.data_dir, &cli.org, args),
        Command::CreateOrder(args) => run_create_order(&cli.data_dir, &cli.org, args),
        Command::ShowCustomers(args) => run_show_customers(&cli.data_dir, &cli.org, args),
        Command::ShowProducts(args) => run_show_products(&cli.data_dir, &cli.org, args),
        Command::ShowOrders(args) => run_show_orders(&cli.data_dir, &cli.org, args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run_migrations(data_dir: &Path, args: RunMigrationsArgs) -> Result<(), String> {
    let store = OrgStore::new(data_dir);
    let runner = MigrationRunner::new(&args.migrations);

    let mut state = MigrationState::load(&args.state).map_err(|e| e.to_string())?;
    let outcome = run_all(&runner, &store, &mut state);

    // Save in the failure path too: watermarks advanced before the error
    // survive, so a rerun resumes at the failing unit.
    state.save(&args.state).map_err(|e| e.to_string())?;
    outcome.map_err(|e| e.to_string())?;

    println!("Migrations up to date for {} org(s).", state.orgs.len());
    Ok(())
}

fn run_create_customer(
    data_dir: &Path,
    org: &str,
    args: CreateCustomerArgs,
) -> Result<(), String> {
    let state = validate_state(&args.state).map_err(|e| e.to_string())?;

    let conn = open_org(data_dir, org)?;
    let query = InventoryQuery::new(conn.connection());
    let customer = query
        .insert_customer(&args.email, &state)
        .map_err(|e| e.to_string())?;

    print_customers(&[customer]);
    Ok(())
}

fn run_create_product(
    data_dir: &Path,
    org: &str,
    args: CreateProductArgs,
) -> Result<(), String> {
    let conn = open_org(data_dir, org)?;
    let query = InventoryQuery::new(conn.connection());
    let product = query
        .insert_product(&args.name, args.price, args.sku.as_deref())
        .map_err(|e| e.to_string())?;

    print_products(&[product]);
    Ok(())
}

fn run_create_order(data_dir: &Path, org: &str, args: CreateOrderArgs) -> Result<(), String> {
    let conn = open_org(data_dir, org)?;
    let query = InventoryQuery::new(conn.connection());
    let order = query
        .insert_order(args.customer_id, args.product_id)
        .map_err(|e| e.to_string())?;

    print_orders(&[order]);
    Ok(())
}

fn run_show_customers(
    data_dir: &Path,
    org: &str,
    args: ShowCustomersArgs,
) -> Result<(), String> {
    let conn = open_org(data_dir, org)?;
    let customers = InventoryQuery::new(conn.connection())
        .list_customers(&args.email, &args.state)
        .map_err(|e| e.to_string())?;

    print_customers(&customers);
    Ok(())
}

fn run_show_products(data_dir: &Path, org: &str, args: ShowProductsArgs) -> Result<(), String> {
    let conn = open_org(data_dir, org)?;
    let products = InventoryQuery::new(conn.connection())
        .list_products(&args.name)
        .map_err(|e| e.to_string())?;

    print_products(&products);
    Ok(())
}

fn run_show_orders(data_dir: &Path, org: &str, args: ShowOrdersArgs) -> Result<(), String> {
    let conn = open_org(data_dir, org)?;
    let orders = InventoryQuery::new(conn.connection())
        .list_orders(args.customer_id, args.product_id)
        .map_err(|e| e.to_string())?;

    print_orders(&orders);
    Ok(())
}

fn open_org(data_dir: &Path, org: &str) -> Result<OrgConnection, String> {
    OrgStore::new(data_dir).open(org).map_err(|e| e.to_string())
}

// ---------------------------------------------------------------------------
// Table output
// ---------------------------------------------------------------------------

fn print_customers(customers: &[Customer]) {
    println!("{:<3} | {:<50} | {:<5}", "ID", "Email", "State");
    for c in customers {
        println!("{:<3} | {:<50} | {:<5}", c.id, c.email, c.state);
    }
}

fn print_products(products: &[Product]) {
    println!(
        "{:<3} | {:<25} | {:<13} | {:<25}",
        "ID", "Name", "Price", "Sku"
    );
    for p in products {
        println!(
            "{:<3} | {:<25} | {:<13.2} | {:<25}",
            p.id,
            p.name,
            p.price,
            p.sku.as_deref().unwrap_or("")
        );
    }
}

fn print_orders(orders: &[Order]) {
    println!(
        "{:<10} | {:<12} | {:<13}",
        "OrderID", "ProductID", "CustomerID"
    );
    for o in orders {
        println!("{:<10} | {:<12} | {:<13}", o.id, o.product_id, o.customer_id);
    }
}
