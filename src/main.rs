use database::FixtureStore;
use env_logger::Env;
use log::info;
use server::{GameAppData, MatchSimulatorServer};
use std::sync::Arc;

#[cfg(target_os = "linux")]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[tokio::main]
async fn main() {
    color_eyre::install().unwrap();

    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let store = FixtureStore::with_sample_data();

    let fixtures = store.fixture_ids().await;
    info!("{} fixture(s) ready: {}", fixtures.len(), fixtures.join(", "));

    let data = GameAppData {
        store: Arc::new(store),
    };

    MatchSimulatorServer::new(data).run().await;
}
