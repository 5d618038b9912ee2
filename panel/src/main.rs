//! Demo binary: mounts the panel on the simulated chain and walks through a short
//! trading session, logging every state transition.

use std::sync::Arc;

use anyhow::Context;
use chrono::Utc;
use panel::app::{App, Tab};
use panel::core::service::Signer;
use panel::debug::{init_logger, DebugConfig};
use panel::providers::{ContractSet, PanelInit};
use panel::services::signer::LocalSigner;
use panel::services::sim::SimulatedChain;
use panel::views::{GuideView, MarketView, MyListingsView, MyOrdersView, MyPlanetsView};
use shared::{Address, Entity, EntityId, Listing, ListingId, Price};

const RIVAL: &str = "0xb0b0000000000000000000000000000000000002";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = DebugConfig::from_env();
    let _log_guard = init_logger(&config).context("failed to initialize logging")?;

    let signer = match LocalSigner::from_env() {
        Ok(signer) => signer,
        Err(e) => {
            tracing::info!(reason = %e, "Using the simulated default account");
            LocalSigner::from_hex("0xa11ce00000000000000000000000000000000001")?
        }
    };
    let me = signer.address();

    let chain = Arc::new(SimulatedChain::auto(config.sim_confirm_delay).with_account(me.clone()));
    chain.add_entity(Entity::new(EntityId::new("planet-aurora"), me.clone(), "Aurora", 3));
    chain.add_entity(Entity::new(EntityId::new("planet-vesta"), me.clone(), "Vesta", 1));
    chain.add_entity(Entity::new(EntityId::new("planet-boreas"), Address::new(RIVAL), "Boreas", 2));
    let rival_listing = Listing::open(
        ListingId::new(1),
        Address::new(RIVAL),
        EntityId::new("planet-boreas"),
        Price::new(250),
        Utc::now(),
    );
    chain.seed_listing(rival_listing.clone());

    let init = PanelInit::new(
        chain.clone(),
        ContractSet::new(chain.clone(), chain.clone()),
        Arc::new(signer),
    )
    .with_listings(vec![rival_listing]);
    let mut app = App::new(init, &config);
    let context = Arc::clone(app.context());

    let mut planets = MyPlanetsView::build(&context)?;
    let aurora = planets.select_planet(&EntityId::new("planet-aurora"))?.id.clone();
    context.listings.create(aurora, Price::new(120))?;
    context.listings.accept(ListingId::new(1))?;

    while !context.transactions.pending().is_empty() {
        if !app.process_next_event().await {
            break;
        }
    }

    for &tab in Tab::all() {
        app.navigation_mut().select(tab);
        let rendered = match app.navigation().active() {
            Tab::Market => serde_json::to_string_pretty(&MarketView::build(&context))?,
            Tab::MyListings => serde_json::to_string_pretty(&MyListingsView::build(&context)?)?,
            Tab::MyOrders => serde_json::to_string_pretty(&MyOrdersView::build(&context)?)?,
            Tab::MyPlanets => {
                planets.refresh(&context)?;
                serde_json::to_string_pretty(&planets)?
            }
            Tab::Guide => serde_json::to_string_pretty(&GuideView::default())?,
        };
        println!("== {} ==\n{}", tab.title(), rendered);
    }

    Ok(())
}
