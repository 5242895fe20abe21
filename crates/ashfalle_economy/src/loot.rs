//! # Loot Table System
//!
//! A [`LootTable`] aggregates weighted [`LootPool`]s and rolls them in two
//! stages:
//!
//! 1. **Nothing gate** - a uniform draw below `nothing_chance` is a miss. The
//!    gate is flat; it is never blended into the pool weights.
//! 2. **Weighted pick** - a second draw scaled by the total weight selects the
//!    first pool whose cumulative weight is `>=` the draw. Ties go to the
//!    earlier-registered pool.
//!
//! The chosen pool then produces one piece of [`Loot`]. Rolling never fails:
//! an empty table rolls nothing, and a pool that cannot produce is logged and
//! counted as a miss.
//!
//! ## Pools
//!
//! - [`PoolSource::Fixed`] picks uniformly from a list of prepared items.
//! - [`PoolSource::Artistry`] generates fresh equipment from loot options via
//!   [`random_equipment`](crate::artistry::random_equipment).
//!
//! ## Threading
//!
//! A table is plain data and `Send + Sync`. Hosts that register pools while
//! other threads roll wrap it in a [`SharedLootTable`].

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use ashfalle_shared::{
    GameSettings, LootOptions, DEFAULT_NOTHING_CHANCE, DEFAULT_POOL_WEIGHT, DEFAULT_ROLL_COUNT,
};
use parking_lot::{RwLock, RwLockReadGuard};

use crate::artistry::random_equipment;
use crate::equipable::Equipable;
use crate::error::{EconomyError, EconomyResult};
use crate::item::Item;
use crate::rng::{choose, RandomSource};

/// One rolled drop.
#[derive(Clone, Debug, PartialEq)]
pub enum Loot {
    /// A plain item.
    Item(Item),
    /// A piece of equipment.
    Equipable(Equipable),
}

impl Loot {
    /// The item record, whichever variant this is.
    #[must_use]
    pub const fn item(&self) -> &Item {
        match self {
            Self::Item(item) => item,
            Self::Equipable(equipable) => equipable.item(),
        }
    }

    /// The equipment, if this drop is equipment.
    #[must_use]
    pub const fn as_equipable(&self) -> Option<&Equipable> {
        match self {
            Self::Item(_) => None,
            Self::Equipable(equipable) => Some(equipable),
        }
    }
}

impl From<Item> for Loot {
    fn from(item: Item) -> Self {
        Self::Item(item)
    }
}

impl From<Equipable> for Loot {
    fn from(equipable: Equipable) -> Self {
        Self::Equipable(equipable)
    }
}

impl fmt::Display for Loot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Item(item) => fmt::Display::fmt(item, f),
            Self::Equipable(equipable) => fmt::Display::fmt(equipable, f),
        }
    }
}

/// Where a pool's loot comes from.
#[derive(Clone, Debug, PartialEq)]
pub enum PoolSource {
    /// A fixed list; each produce picks one uniformly.
    Fixed(Vec<Loot>),
    /// Procedural equipment generated from these options.
    Artistry(LootOptions),
}

fn sanitize_weight(weight: Option<f64>) -> f64 {
    match weight {
        Some(weight) if weight.is_finite() && weight > 0.0 => weight,
        _ => DEFAULT_POOL_WEIGHT,
    }
}

/// A named, weighted source of loot.
#[derive(Clone, Debug, PartialEq)]
pub struct LootPool {
    name: String,
    weight: f64,
    source: PoolSource,
}

impl LootPool {
    /// Creates a pool.
    ///
    /// A missing, non-positive or non-finite weight becomes `1.0`.
    #[must_use]
    pub fn new(name: impl Into<String>, source: PoolSource, weight: Option<f64>) -> Self {
        Self {
            name: name.into(),
            weight: sanitize_weight(weight),
            source,
        }
    }

    /// Creates a pool that picks from prepared items.
    #[must_use]
    pub fn fixed<I, L>(name: impl Into<String>, items: I, weight: Option<f64>) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<Loot>,
    {
        let items = items.into_iter().map(Into::into).collect();
        Self::new(name, PoolSource::Fixed(items), weight)
    }

    /// Creates a pool that generates equipment from `options`.
    #[must_use]
    pub fn artistry(name: impl Into<String>, options: LootOptions, weight: Option<f64>) -> Self {
        Self::new(name, PoolSource::Artistry(options), weight)
    }

    /// Pool name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Selection weight, always finite and positive.
    #[must_use]
    pub const fn weight(&self) -> f64 {
        self.weight
    }

    /// Changes the weight. Tables snapshot weights at registration, so this
    /// only affects tables the pool is added to afterwards.
    ///
    /// Returns `false` if the input was rejected and the default used instead.
    pub fn set_weight(&mut self, weight: f64) -> bool {
        self.weight = sanitize_weight(Some(weight));
        self.weight.to_bits() == weight.to_bits()
    }

    /// Pool contents.
    #[must_use]
    pub const fn source(&self) -> &PoolSource {
        &self.source
    }

    /// Produces one piece of loot.
    ///
    /// # Errors
    ///
    /// - `EconomyError::EmptyPool` for a fixed pool without items.
    /// - Any factory error from an artistry pool, e.g.
    ///   `EconomyError::UnsupportedItemType` for a bad item-type filter.
    pub fn produce<R: RandomSource + ?Sized>(
        &self,
        rng: &mut R,
        settings: &GameSettings,
    ) -> EconomyResult<Loot> {
        match &self.source {
            PoolSource::Fixed(items) => {
                choose(rng, items)
                    .cloned()
                    .ok_or_else(|| EconomyError::EmptyPool {
                        pool: self.name.clone(),
                    })
            }
            PoolSource::Artistry(options) => {
                random_equipment(options, settings, rng).map(Loot::Equipable)
            }
        }
    }
}

/// Weighted loot pools behind a nothing-chance gate.
#[derive(Clone, Debug)]
pub struct LootTable {
    pools: Vec<LootPool>,
    /// Running prefix sums of pool weights, in registration order.
    cumulative_weights: Vec<f64>,
    nothing_chance: f64,
    settings: GameSettings,
}

impl Default for LootTable {
    fn default() -> Self {
        Self::new(None)
    }
}

impl LootTable {
    /// Creates an empty table.
    ///
    /// `None` or NaN uses the default nothing chance of `0.7`. Other values are
    /// clamped into `[0, 1]`, so `Some(0.0)` means every roll reaches the pools.
    #[must_use]
    pub fn new(nothing_chance: Option<f64>) -> Self {
        let mut table = Self {
            pools: Vec::new(),
            cumulative_weights: Vec::new(),
            nothing_chance: DEFAULT_NOTHING_CHANCE,
            settings: GameSettings::default(),
        };
        if let Some(chance) = nothing_chance {
            table.set_nothing_chance(chance);
        }
        table
    }

    /// Uses `settings` for artistry pools instead of the defaults.
    #[must_use]
    pub fn with_settings(mut self, settings: GameSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Settings handed to artistry pools.
    #[must_use]
    pub const fn settings(&self) -> &GameSettings {
        &self.settings
    }

    /// Probability that a single roll drops nothing.
    #[must_use]
    pub const fn nothing_chance(&self) -> f64 {
        self.nothing_chance
    }

    /// Sets the nothing chance, clamped into `[0, 1]`. NaN restores the default.
    ///
    /// Returns `false` if the input had to be adjusted.
    pub fn set_nothing_chance(&mut self, chance: f64) -> bool {
        if chance.is_nan() {
            self.nothing_chance = DEFAULT_NOTHING_CHANCE;
            return false;
        }
        self.nothing_chance = chance.clamp(0.0, 1.0);
        self.nothing_chance.to_bits() == chance.to_bits()
    }

    /// Appends pools in order, snapshotting each weight.
    ///
    /// A pool whose weight would push the total weight past `f64::MAX` is
    /// skipped and logged at `warn`.
    pub fn add_loot_pools(&mut self, pools: impl IntoIterator<Item = LootPool>) {
        for pool in pools {
            let total = self.total_weight() + pool.weight();
            if !total.is_finite() {
                tracing::warn!(
                    "skipped loot pool '{}': weight {} overflows the table total",
                    pool.name(),
                    pool.weight()
                );
                continue;
            }
            tracing::debug!(
                "registered loot pool '{}' (weight {}, cumulative {total})",
                pool.name(),
                pool.weight()
            );
            self.cumulative_weights.push(total);
            self.pools.push(pool);
        }
    }

    /// Registered pools, in registration order.
    #[must_use]
    pub fn pools(&self) -> &[LootPool] {
        &self.pools
    }

    /// Number of registered pools.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pools.len()
    }

    /// Returns `true` if no pools are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }

    /// Sum of all registered weights.
    #[must_use]
    pub fn total_weight(&self) -> f64 {
        self.cumulative_weights.last().copied().unwrap_or(0.0)
    }

    /// Index of the pool a uniform draw in `[0, 1)` lands on.
    fn select_pool(&self, uniform: f64) -> Option<usize> {
        let total = self.total_weight();
        if total <= 0.0 {
            return None;
        }
        let target = uniform * total;
        self.cumulative_weights
            .iter()
            .position(|&cumulative| target <= cumulative)
    }

    fn roll_indexed<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Option<(usize, Loot)> {
        if rng.next_uniform() < self.nothing_chance {
            tracing::trace!("roll missed the nothing gate");
            return None;
        }
        if self.is_empty() {
            return None;
        }

        let index = self.select_pool(rng.next_uniform())?;
        let pool = &self.pools[index];
        match pool.produce(rng, &self.settings) {
            Ok(loot) => {
                tracing::debug!("pool '{}' dropped {loot}", pool.name());
                Some((index, loot))
            }
            Err(err) => {
                tracing::warn!("pool '{}' produced nothing: {err}", pool.name());
                None
            }
        }
    }

    /// Rolls once. `None` means no drop.
    pub fn roll<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Option<Loot> {
        self.roll_indexed(rng).map(|(_, loot)| loot)
    }

    /// Rolls `count` times and returns the drops in roll order.
    pub fn roll_multiple<R: RandomSource + ?Sized>(&self, rng: &mut R, count: usize) -> Vec<Loot> {
        let mut drops = Vec::with_capacity(count);
        for _ in 0..count {
            if let Some(loot) = self.roll(rng) {
                drops.push(loot);
            }
        }
        drops
    }

    /// Rolls the default three times.
    pub fn roll_default<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Vec<Loot> {
        self.roll_multiple(rng, DEFAULT_ROLL_COUNT)
    }

    /// Rolls `iterations` times and tallies the outcome per pool.
    #[must_use]
    pub fn run_statistics<R: RandomSource + ?Sized>(
        &self,
        rng: &mut R,
        iterations: u32,
    ) -> LootStatistics {
        let mut stats = LootStatistics::new();

        for _ in 0..iterations {
            stats.total_rolls += 1;
            if let Some((index, _)) = self.roll_indexed(rng) {
                stats.total_drops += 1;
                *stats
                    .pool_counts
                    .entry(self.pools[index].name().to_string())
                    .or_insert(0) += 1;
            }
        }

        stats
    }
}

/// Outcome of [`LootTable::run_statistics`].
#[derive(Clone, Debug, Default)]
pub struct LootStatistics {
    /// Total number of rolls performed.
    pub total_rolls: u64,
    /// Total number of successful drops.
    pub total_drops: u64,
    /// Drop counts by pool name.
    pub pool_counts: HashMap<String, u32>,
}

impl LootStatistics {
    /// Creates empty statistics.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the drop rate as a percentage.
    #[must_use]
    pub fn drop_rate_percent(&self) -> f64 {
        if self.total_rolls == 0 {
            0.0
        } else {
            #[allow(clippy::cast_precision_loss)]
            let rate = self.total_drops as f64 / self.total_rolls as f64;
            rate * 100.0
        }
    }

    /// Drops from the named pool.
    #[must_use]
    pub fn count_for(&self, pool: &str) -> u32 {
        self.pool_counts.get(pool).copied().unwrap_or(0)
    }
}

/// A loot table shared between threads.
///
/// Registration takes the write lock and rolls take the read lock, so a roll
/// never sees a half-registered pool.
#[derive(Clone, Debug, Default)]
pub struct SharedLootTable {
    inner: Arc<RwLock<LootTable>>,
}

impl SharedLootTable {
    /// Wraps `table` for shared use.
    #[must_use]
    pub fn new(table: LootTable) -> Self {
        Self {
            inner: Arc::new(RwLock::new(table)),
        }
    }

    /// Appends pools under the write lock.
    pub fn add_loot_pools(&self, pools: impl IntoIterator<Item = LootPool>) {
        self.inner.write().add_loot_pools(pools);
    }

    /// Rolls once under the read lock.
    pub fn roll<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Option<Loot> {
        self.inner.read().roll(rng)
    }

    /// Rolls `count` times under one read lock.
    pub fn roll_multiple<R: RandomSource + ?Sized>(&self, rng: &mut R, count: usize) -> Vec<Loot> {
        self.inner.read().roll_multiple(rng, count)
    }

    /// Read access to the table.
    pub fn read(&self) -> RwLockReadGuard<'_, LootTable> {
        self.inner.read()
    }
}

impl From<LootTable> for SharedLootTable {
    fn from(table: LootTable) -> Self {
        Self::new(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ItemOptions;
    use crate::rng::{seeded_rng, ScriptedSource};

    fn named(name: &str) -> Item {
        Item::new(ItemOptions::default().with_name(name))
    }

    fn two_pool_table(nothing_chance: f64) -> LootTable {
        let mut table = LootTable::new(Some(nothing_chance));
        table.add_loot_pools([
            LootPool::fixed("Common", [named("Copper Coin")], Some(3.0)),
            LootPool::fixed("Rare", [named("Silver Ring")], Some(1.0)),
        ]);
        table
    }

    #[test]
    fn test_nothing_chance_defaults() {
        assert!((LootTable::new(None).nothing_chance() - 0.7).abs() < f64::EPSILON);
        assert!((LootTable::new(Some(f64::NAN)).nothing_chance() - 0.7).abs() < f64::EPSILON);
        assert!(LootTable::new(Some(0.0)).nothing_chance().abs() < f64::EPSILON);
        assert!((LootTable::new(Some(4.0)).nothing_chance() - 1.0).abs() < f64::EPSILON);
        assert!(LootTable::new(Some(-1.0)).nothing_chance().abs() < f64::EPSILON);
    }

    #[test]
    fn test_pool_weight_defaults() {
        assert!((LootPool::fixed("a", Vec::<Item>::new(), None).weight() - 1.0).abs() < f64::EPSILON);
        assert!((LootPool::fixed("b", Vec::<Item>::new(), Some(0.0)).weight() - 1.0).abs() < f64::EPSILON);
        assert!((LootPool::fixed("c", Vec::<Item>::new(), Some(-2.0)).weight() - 1.0).abs() < f64::EPSILON);

        let mut pool = LootPool::fixed("d", Vec::<Item>::new(), Some(2.5));
        assert!((pool.weight() - 2.5).abs() < f64::EPSILON);
        assert!(!pool.set_weight(f64::INFINITY));
        assert!((pool.weight() - 1.0).abs() < f64::EPSILON);
        assert!(pool.set_weight(4.0));
    }

    #[test]
    fn test_certain_nothing_never_drops() {
        let table = two_pool_table(1.0);
        let mut rng = seeded_rng(11);
        for _ in 0..1000 {
            assert!(table.roll(&mut rng).is_none());
        }
    }

    #[test]
    fn test_single_pool_always_selected() {
        let mut table = LootTable::new(Some(0.0));
        table.add_loot_pools([LootPool::fixed("Only", [named("Stick")], Some(1.0))]);
        let mut rng = seeded_rng(12);
        for _ in 0..1000 {
            let loot = table.roll(&mut rng).unwrap();
            assert_eq!(loot.item().name(), "Stick");
        }
    }

    #[test]
    fn test_empty_table_drops_nothing() {
        let table = LootTable::new(Some(0.0));
        let mut rng = seeded_rng(13);
        assert!(table.roll(&mut rng).is_none());
        assert!(table.roll_default(&mut rng).is_empty());
    }

    #[test]
    fn test_gate_then_weighted_pick() {
        let table = two_pool_table(0.5);

        // gate 0.4 < 0.5 misses without a second draw
        let mut miss = ScriptedSource::new(vec![0.4]);
        assert!(table.roll(&mut miss).is_none());
        assert_eq!(miss.draws(), 1);

        // 0.5 passes; 0.7 * 4 = 2.8 <= 3 picks the first pool
        let mut common = ScriptedSource::new(vec![0.5, 0.7, 0.0]);
        assert_eq!(table.roll(&mut common).unwrap().item().name(), "Copper Coin");

        // 0.8 * 4 = 3.2 > 3 picks the second pool
        let mut rare = ScriptedSource::new(vec![0.5, 0.8, 0.0]);
        assert_eq!(table.roll(&mut rare).unwrap().item().name(), "Silver Ring");
    }

    #[test]
    fn test_boundary_tie_goes_to_earlier_pool() {
        let table = two_pool_table(0.0);
        assert_eq!(table.select_pool(0.75), Some(0));
        assert_eq!(table.select_pool(0.0), Some(0));
        assert_eq!(table.select_pool(0.76), Some(1));
    }

    #[test]
    fn test_overflowing_weight_is_skipped() {
        let mut table = LootTable::new(Some(0.0));
        table.add_loot_pools([
            LootPool::fixed("A", [named("Anvil")], Some(1e308)),
            LootPool::fixed("B", [named("Bellows")], Some(1e308)),
        ]);
        assert_eq!(table.len(), 1);
        assert!(table.total_weight().is_finite());

        let mut low = ScriptedSource::new(vec![0.5, 0.0, 0.0]);
        assert_eq!(table.roll(&mut low).unwrap().item().name(), "Anvil");

        let mut rng = seeded_rng(1);
        let stats = table.run_statistics(&mut rng, 10_000);
        assert_eq!(stats.count_for("A"), 10_000);
    }

    #[test]
    fn test_large_weights_keep_proportions() {
        let mut table = LootTable::new(Some(0.0));
        table.add_loot_pools([
            LootPool::fixed("A", [named("Anvil")], Some(8e307)),
            LootPool::fixed("B", [named("Bellows")], Some(8e307)),
        ]);
        assert_eq!(table.len(), 2);

        let mut rng = seeded_rng(2);
        let stats = table.run_statistics(&mut rng, 10_000);
        assert!(stats.count_for("A") > 4_000, "A {}", stats.count_for("A"));
        assert!(stats.count_for("B") > 4_000, "B {}", stats.count_for("B"));
    }

    #[test]
    fn test_empty_fixed_pool_is_a_miss() {
        let mut table = LootTable::new(Some(0.0));
        table.add_loot_pools([LootPool::fixed("Hollow", Vec::<Item>::new(), None)]);
        let mut rng = seeded_rng(14);
        assert!(table.roll(&mut rng).is_none());

        let settings = GameSettings::default();
        assert_eq!(
            table.pools()[0].produce(&mut rng, &settings).unwrap_err(),
            EconomyError::EmptyPool {
                pool: "Hollow".to_string()
            }
        );
    }

    #[test]
    fn test_roll_multiple_bounds() {
        let table = two_pool_table(0.5);
        let mut rng = seeded_rng(15);
        assert!(table.roll_multiple(&mut rng, 0).is_empty());
        for _ in 0..100 {
            assert!(table.roll_multiple(&mut rng, 5).len() <= 5);
            assert!(table.roll_default(&mut rng).len() <= 3);
        }

        let always = two_pool_table(0.0);
        assert_eq!(always.roll_multiple(&mut rng, 7).len(), 7);
    }

    #[test]
    fn test_artistry_pool_generates_equipment() {
        let mut table = LootTable::new(Some(0.0));
        table.add_loot_pools([LootPool::artistry(
            "Crafted",
            LootOptions::default().with_item_type("jewelry"),
            None,
        )]);
        let mut rng = seeded_rng(16);
        for loot in table.roll_multiple(&mut rng, 50) {
            let equipable = loot.as_equipable().unwrap();
            let name = equipable.item().name();
            assert!(name == "Necklace" || name == "Ring", "{name}");
        }
    }

    #[test]
    fn test_artistry_pool_uses_table_settings() {
        let mut settings = GameSettings::default();
        settings.game.max_player_level = 3;
        let mut table = LootTable::new(Some(0.0)).with_settings(settings);
        table.add_loot_pools([LootPool::artistry("Crafted", LootOptions::default(), None)]);

        let mut rng = seeded_rng(17);
        for loot in table.roll_multiple(&mut rng, 200) {
            let level = loot.as_equipable().unwrap().level();
            assert!((1..=3).contains(&level));
        }
    }

    #[test]
    fn test_statistics_follow_weights() {
        let table = two_pool_table(0.0);
        let mut rng = seeded_rng(18);
        let stats = table.run_statistics(&mut rng, 20_000);

        assert_eq!(stats.total_rolls, 20_000);
        assert_eq!(stats.total_drops, 20_000);
        assert!((stats.drop_rate_percent() - 100.0).abs() < f64::EPSILON);

        let common = f64::from(stats.count_for("Common"));
        let ratio = common / 20_000.0;
        assert!((ratio - 0.75).abs() < 0.02, "common ratio {ratio}");
    }

    #[test]
    fn test_statistics_nothing_rate() {
        let table = two_pool_table(0.7);
        let mut rng = seeded_rng(19);
        let stats = table.run_statistics(&mut rng, 20_000);
        let rate = stats.drop_rate_percent();
        assert!((rate - 30.0).abs() < 2.0, "drop rate {rate}");
    }

    #[test]
    fn test_shared_table_across_threads() {
        let shared = SharedLootTable::new(LootTable::new(Some(0.0)));
        shared.add_loot_pools([LootPool::fixed("Common", [named("Pebble")], None)]);

        let handles: Vec<_> = (0..4)
            .map(|seed| {
                let table = shared.clone();
                std::thread::spawn(move || {
                    let mut rng = seeded_rng(seed);
                    table.roll_multiple(&mut rng, 100).len()
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), 100);
        }
        assert_eq!(shared.read().len(), 1);
    }
}
