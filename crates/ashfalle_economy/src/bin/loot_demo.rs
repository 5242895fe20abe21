//! Loot table demo.
//!
//! Bootstraps the settings file, builds an example table and rolls it.
//!
//! Run with: cargo run --package ashfalle_economy --features demo --bin loot_demo [seed]

use std::process::ExitCode;

use ashfalle_economy::{entropy_rng, seeded_rng, Item, ItemCategory, ItemOptions, LootPool, LootTable};
use ashfalle_shared::{GameSettings, LootOptions, SettingsResult, DEFAULT_SETTINGS_PATH};

fn common_items() -> Vec<Item> {
    vec![
        Item::new(
            ItemOptions::default()
                .with_name("Copper Coin")
                .with_value(1.0)
                .with_max_quantity(1000)
                .with_quantity(12),
        ),
        Item::new(
            ItemOptions::default()
                .with_name("Bone Fragment")
                .with_category(ItemCategory::Component)
                .with_value(4.0),
        ),
    ]
}

fn rare_items() -> Vec<Item> {
    vec![Item::new(
        ItemOptions::default()
            .with_name("Ember Draught")
            .with_category(ItemCategory::Consumable)
            .with_value(12_050.0),
    )]
}

fn build_table(settings: GameSettings) -> LootTable {
    let crafted = LootOptions::default()
        .with_artistry_range(2, 4)
        .with_level_range(1, None)
        .with_item_type("armor");

    let mut table = LootTable::new(None).with_settings(settings);
    table.add_loot_pools([
        LootPool::fixed("Common Loot", common_items(), Some(10.0)),
        LootPool::fixed("Rare Loot", rare_items(), Some(1.0)),
        LootPool::artistry("Randomized Loot", crafted, Some(100.0)),
    ]);
    table
}

fn run(seed: Option<u64>) -> SettingsResult<()> {
    let settings = GameSettings::load_or_create(DEFAULT_SETTINGS_PATH)?;
    let table = build_table(settings);

    let mut rng = seed.map_or_else(entropy_rng, seeded_rng);
    let drops = table.roll_default(&mut rng);

    if drops.is_empty() {
        println!("Nothing dropped.");
    }
    for loot in &drops {
        println!("{loot}");
    }

    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let seed = match std::env::args().nth(1).map(|arg| arg.parse::<u64>()) {
        None => None,
        Some(Ok(seed)) => Some(seed),
        Some(Err(err)) => {
            tracing::error!("invalid seed: {err}");
            return ExitCode::FAILURE;
        }
    };

    match run(seed) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
