//! Taxi service demo server
//!
//! Seeds a few manufacturers, cars and drivers into in-memory stores and
//! serves the list pages. Log in as `admin` / `admin12345`.
//!
//! ```sh
//! RUST_LOG=taxi=debug cargo run --example taxi_server -- config/taxi.yaml
//! ```

use taxi::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => TaxiConfig::from_yaml_file(&path)?,
        None => TaxiConfig::default_config(),
    };

    let stores = TaxiStores::in_memory();
    populate_test_data(&stores).await?;

    tracing::info!(
        bind = %config.server.bind,
        page_size = config.pagination.page_size,
        "starting taxi service"
    );

    let sessions = InMemorySessionStore::with_ttl_minutes(config.auth.session_ttl_minutes);

    ServerBuilder::new()
        .with_config(config)
        .with_stores(stores)
        .with_session_store(sessions)
        .serve()
        .await
}

/// Populate the stores with demo data
async fn populate_test_data(stores: &TaxiStores) -> Result<()> {
    let mut manufacturer_ids = Vec::new();
    for (name, country) in [
        ("Volkswagen", "Germany"),
        ("Renault", "France"),
        ("BMW", "Germany"),
        ("Toyota", "Japan"),
        ("Skoda", "Czech Republic"),
        ("Ford", "USA"),
    ] {
        let manufacturer = stores
            .manufacturers
            .create(Manufacturer::new(name, country))
            .await?;
        manufacturer_ids.push(manufacturer.id);
    }

    let admin = stores
        .drivers
        .create(
            Driver::new("admin", "ADM00001")
                .with_name("Admin", "User")
                .with_password("admin12345")?,
        )
        .await?;

    let mut driver_ids = vec![admin.id];
    for (username, license, first, last) in [
        ("uklon_driver", "UKL11111", "Oleh", "Koval"),
        ("bolt_driver", "BLT11111", "Iryna", "Shevchenko"),
        ("uber_driver", "UBR11111", "Taras", "Melnyk"),
    ] {
        let driver = stores
            .drivers
            .create(
                Driver::new(username, license)
                    .with_name(first, last)
                    .with_password("driver12345")?,
            )
            .await?;
        driver_ids.push(driver.id);
    }

    for (index, model) in [
        "Arteon", "Passat", "Duster", "Logan", "330i", "X5", "Camry", "Octavia", "Focus",
    ]
    .into_iter()
    .enumerate()
    {
        let manufacturer_id = manufacturer_ids[index % manufacturer_ids.len()];
        let driver_id = driver_ids[index % driver_ids.len()];
        stores
            .cars
            .create(Car::new(model, manufacturer_id).with_drivers([driver_id]))
            .await?;
    }

    Ok(())
}
