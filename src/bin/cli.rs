//! flatstore CLI
//!
//! Command-line interface over a flatstore data directory.

use std::fmt::Display;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use flatstore::{Access, Config, FixedRecord, Product, Store, Table};
use tracing_subscriber::{fmt, EnvFilter};

/// flatstore CLI
#[derive(Parser, Debug)]
#[command(name = "flatstore-cli")]
#[command(about = "Flat-file product/access record store")]
#[command(version)]
struct Args {
    /// Data directory
    #[arg(short, long, default_value = "./flatstore_data")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum TableName {
    Products,
    Accesses,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Replace both tables with the rows of a CSV file
    Load {
        /// CSV file with a header row
        input: PathBuf,
    },

    /// Print every record of a table
    List {
        table: TableName,
    },

    /// Look up a record by id
    Get {
        table: TableName,
        id: i32,

        /// Go through the primary index instead of searching the data file
        #[arg(long)]
        index: bool,
    },

    /// Append a product under the next free id
    InsertProduct {
        #[arg(long)]
        product_ref: i32,
        #[arg(long)]
        price: f32,
        #[arg(long, default_value = "")]
        brand: String,
        #[arg(long, default_value = "")]
        category: String,

        /// Rebuild the product index afterwards
        #[arg(long)]
        reindex: bool,
    },

    /// Append an access under the next free id
    InsertAccess {
        #[arg(long)]
        session: String,
        #[arg(long)]
        user_id: i32,
        #[arg(long)]
        event: String,

        /// Rebuild the access index afterwards
        #[arg(long)]
        reindex: bool,
    },

    /// Delete a record by id (rebuilds that table's index)
    Delete {
        table: TableName,
        id: i32,
    },

    /// Rebuild one index, or both when no table is given
    BuildIndex {
        table: Option<TableName>,
    },

    /// Show the most expensive product
    MaxPrice,

    /// Show the most frequent user session
    TopSession,

    /// Run the full load / insert / lookup / index / delete walkthrough
    Demo {
        /// CSV file with a header row
        input: PathBuf,
    },
}

fn main() {
    // Logs go to stderr so reports on stdout stay clean
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,flatstore=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    tracing::debug!("flatstore v{}", flatstore::VERSION);

    let config = Config::builder().data_dir(&args.data_dir).build();

    let store = match Store::open(config) {
        Ok(store) => store,
        Err(e) => {
            tracing::error!("Failed to open store: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&store, args.command) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(store: &Store, command: Commands) -> flatstore::Result<()> {
    match command {
        Commands::Load { input } => {
            let stats = store.load_csv(&input)?;
            println!("Loaded {} rows from {}", stats.rows, input.display());
        }
        Commands::List { table } => match table {
            TableName::Products => list(store.products())?,
            TableName::Accesses => list(store.accesses())?,
        },
        Commands::Get { table, id, index } => match table {
            TableName::Products => println!("{}", get(store.products(), id, index)?),
            TableName::Accesses => println!("{}", get(store.accesses(), id, index)?),
        },
        Commands::InsertProduct {
            product_ref,
            price,
            brand,
            category,
            reindex,
        } => {
            let product = Product::new(product_ref, price, &brand, &category);
            println!("Inserted {}", insert(store.products(), product, reindex)?);
        }
        Commands::InsertAccess {
            session,
            user_id,
            event,
            reindex,
        } => {
            let access = Access::new(&session, user_id, &event);
            println!("Inserted {}", insert(store.accesses(), access, reindex)?);
        }
        Commands::Delete { table, id } => {
            match table {
                TableName::Products => store.products().delete(id)?,
                TableName::Accesses => store.accesses().delete(id)?,
            }
            println!("Deleted {:?} record {}", table, id);
        }
        Commands::BuildIndex { table } => {
            if matches!(table, None | Some(TableName::Products)) {
                let stats = store.products().build_index()?;
                println!("Product index: {} entries", stats.entries);
            }
            if matches!(table, None | Some(TableName::Accesses)) {
                let stats = store.accesses().build_index()?;
                println!("Access index: {} entries", stats.entries);
            }
        }
        Commands::MaxPrice => match store.products().max_by_price()? {
            Some(product) => println!("Most expensive: {}", product),
            None => println!("No product has a positive price"),
        },
        Commands::TopSession => {
            let top = store.accesses().most_frequent_session()?;
            println!(
                "Most frequent session: {} ({} occurrences)",
                top.session, top.count
            );
        }
        Commands::Demo { input } => demo(store, &input),
    }

    Ok(())
}

fn list<R: FixedRecord + Display>(table: &Table<R>) -> flatstore::Result<()> {
    let mut count = 0u64;
    for record in table.scan()? {
        println!("{}", record?);
        count += 1;
    }
    println!("Total {} records: {}", R::KIND, count);
    Ok(())
}

fn get<R: FixedRecord>(table: &Table<R>, id: i32, by_index: bool) -> flatstore::Result<R> {
    if by_index {
        table.find_by_index(id)
    } else {
        table.find_by_ordinal(id)
    }
}

fn insert<R: FixedRecord>(table: &Table<R>, record: R, reindex: bool) -> flatstore::Result<R> {
    if reindex {
        table.insert_and_reindex(record)
    } else {
        table.insert(record)
    }
}

/// Report a step's failure and carry on with the walkthrough
fn step<T>(name: &str, result: flatstore::Result<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::error!(step = name, "{}", e);
            None
        }
    }
}

fn show<R: Display>(label: &str, result: flatstore::Result<R>) {
    if let Some(record) = step(label, result) {
        println!("{}: {}", label, record);
    }
}

fn demo(store: &Store, input: &Path) {
    let products = store.products();
    let accesses = store.accesses();

    if step("load", store.load_csv(input)).is_none() {
        return;
    }
    println!("Binary files created from {}", input.display());

    step("list products", list(products));
    step("list accesses", list(accesses));

    let new_product = || Product::new(12345, 99.99, "New Brand", "New Category");
    let new_access = || Access::new("session123", 67890, "view");

    show("Inserted", products.insert(new_product()));
    show("Inserted", accesses.insert(new_access()));

    step("list products", list(products));
    step("list accesses", list(accesses));

    show("Product found", products.find_by_ordinal(999));
    show("Access found", accesses.find_by_ordinal(999));

    match step("max price", products.max_by_price()) {
        Some(Some(product)) => println!("Most expensive: {}", product),
        Some(None) => println!("No product has a positive price"),
        None => {}
    }

    if let Some(top) = step("top session", accesses.most_frequent_session()) {
        println!(
            "Most frequent session: {} ({} occurrences)",
            top.session, top.count
        );
    }

    if step("build indexes", store.build_indexes()).is_none() {
        return;
    }

    show("Product found via index", products.find_by_index(998));
    show("Access found via index", accesses.find_by_index(998));

    show("Inserted", products.insert_and_reindex(new_product()));
    show("Inserted", accesses.insert_and_reindex(new_access()));

    show("Product found via index", products.find_by_index(1001));
    show("Access found via index", accesses.find_by_index(1001));

    if step("delete product", products.delete(1001)).is_some() {
        println!("Removed product 1001");
    }
    if step("delete access", accesses.delete(1001)).is_some() {
        println!("Removed access 1001");
    }

    show("Product found via index", products.find_by_index(1001));
    show("Access found via index", accesses.find_by_index(1001));
}
