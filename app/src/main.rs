use crate::models::{AccountDto, AccountRow, CustomerDto, CustomerRow, OrderDto, OrderRow};
use crate::profiles::{AccountProfile, CustomerProfile};
use mapper::{Mapper, Registry};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod models;
mod profiles;

const DEFAULT_FILTER: &str = "info";

fn main() -> anyhow::Result<()> {
    setup_logging()?;

    let registry = Arc::new(Registry::new());
    registry.apply(&CustomerProfile);
    registry.apply(&AccountProfile);
    info!(mappings = registry.len(), "registry ready");

    let mapper = Mapper::new(registry);

    let customer: CustomerDto = mapper.map(&CustomerRow::sample())?;
    println!("{}", serde_json::to_string_pretty(&customer)?);

    // no registration for orders, the fields are copied by name
    let order: OrderDto = mapper.map(&OrderRow::sample())?;
    println!("{}", serde_json::to_string_pretty(&order)?);

    let account: AccountDto = mapper.map(&AccountRow::sample())?;
    println!("{}", serde_json::to_string_pretty(&account)?);

    Ok(())
}

/// Log filter from `RUST_LOG`, `info` otherwise.
fn setup_logging() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
