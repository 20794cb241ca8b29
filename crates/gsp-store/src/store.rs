use crate::domain::entities::{
    Account, Building, BuildingInventoryRow, Character, DamageListEntry, GroundLoot, OngoingOp,
    PrizeCounter, Region, TradeOrder,
};
use crate::handle::Handle;
use crate::tables::Tables;
use gsp_hexgrid::Coord;
use shared_types::{AccountName, BuildingId, CharacterId, OngoingOpId, RegionId};
use std::cell::RefCell;
use std::rc::Rc;

/// The transactional entity store. A production deployment backs this
/// with a SQL or transactional key/value store; this in-memory
/// implementation is the reference adapter used by every other crate
/// and by the test suite. `Store` is cheap to `Clone` (an `Rc` to
/// shared tables) — exactly one logical instance exists per block,
/// consistent with the single-threaded-per-block processing model.
#[derive(Clone, Default)]
pub struct Store {
    tables: Rc<RefCell<Tables>>,
}

macro_rules! entity_table {
    (
        $table:ident, $kind:literal, $id_ty:ty, $row_ty:ty,
        $checkout:ident, $insert:ident, $exists:ident, $delete:ident, $ids:ident, $alloc:ident, $alloc_fn:ident, $id_field:ident
    ) => {
        impl Store {
            pub fn $checkout(&self, id: $id_ty) -> Option<Handle<$row_ty>> {
                let mut tables = self.tables.borrow_mut();
                let value = tables.$table.remove(&id)?;
                let key = ($kind, id.0);
                tables.checkout(key);
                drop(tables);
                Some(Handle {
                    key,
                    value: Some(value),
                    dirty: false,
                    tables: self.tables.clone(),
                    writeback: |tables, key, value: $row_ty| {
                        tables.$table.insert(<$id_ty>::from(key.1), value);
                    },
                })
            }

            pub fn $insert(&self, row: $row_ty) {
                let mut tables = self.tables.borrow_mut();
                let id = row.$id_field;
                assert!(
                    !tables.$table.contains_key(&id),
                    "duplicate insert of {} {:?}",
                    $kind,
                    id
                );
                tables.$table.insert(id, row);
            }

            pub fn $exists(&self, id: $id_ty) -> bool {
                self.tables.borrow().$table.contains_key(&id)
            }

            /// Deletes a row outright. Panics if the row is currently
            /// checked out — callers must drop or `discard()` the
            /// handle first.
            pub fn $delete(&self, id: $id_ty) {
                let mut tables = self.tables.borrow_mut();
                assert!(
                    !tables.checked_out.contains(&($kind, id.0)),
                    "cannot delete checked-out {} {:?}",
                    $kind,
                    id
                );
                tables.$table.remove(&id);
            }

            /// All ids currently present, ascending.
            pub fn $ids(&self) -> Vec<$id_ty> {
                self.tables.borrow().$table.keys().copied().collect()
            }

            pub fn $alloc(&self) -> $id_ty {
                self.tables.borrow_mut().$alloc_fn()
            }
        }
    };
}

entity_table!(
    characters, "character", CharacterId, Character,
    checkout_character, insert_character, character_exists, delete_character,
    character_ids, alloc_character_id, alloc_character_id, id
);
entity_table!(
    buildings, "building", BuildingId, Building,
    checkout_building, insert_building, building_exists, delete_building,
    building_ids, alloc_building_id, alloc_building_id, id
);
entity_table!(
    regions, "region", RegionId, Region,
    checkout_region, insert_region, region_exists, delete_region,
    region_ids, alloc_region_id, alloc_region_id, id
);
entity_table!(
    ongoing_ops, "ongoing_op", OngoingOpId, OngoingOp,
    checkout_ongoing_op, insert_ongoing_op, ongoing_op_exists, delete_ongoing_op,
    ongoing_op_ids, alloc_ongoing_op_id, alloc_ongoing_op_id, id
);

impl Store {
    pub fn new() -> Self {
        Store::default()
    }

    // -- Accounts (keyed by name, never deleted) --

    pub fn checkout_account(&self, name: &AccountName) -> Option<Handle<Account>> {
        let mut tables = self.tables.borrow_mut();
        let value = tables.accounts.remove(name)?;
        let key = ("account", name_hash(name));
        tables.checkout(key);
        drop(tables);
        Some(Handle {
            key,
            value: Some(value),
            dirty: false,
            tables: self.tables.clone(),
            // The account's own `name` field carries the key back in,
            // so the write-back function needs no captured state and
            // can stay a plain `fn` pointer like every other handle.
            writeback: |tables, _key, value: Account| {
                tables.accounts.insert(value.name.clone(), value);
            },
        })
    }

    pub fn insert_account(&self, account: Account) {
        let mut tables = self.tables.borrow_mut();
        assert!(
            !tables.accounts.contains_key(&account.name),
            "duplicate account {:?}",
            account.name
        );
        tables.accounts.insert(account.name.clone(), account);
    }

    pub fn account_exists(&self, name: &AccountName) -> bool {
        self.tables.borrow().accounts.contains_key(name)
    }

    pub fn account_names(&self) -> Vec<AccountName> {
        self.tables.borrow().accounts.keys().cloned().collect()
    }

    // -- Ground loot --

    pub fn ground_loot_at(&self, coord: Coord) -> Option<GroundLoot> {
        self.tables.borrow().ground_loot.get(&coord).cloned()
    }

    pub fn set_ground_loot(&self, loot: GroundLoot) {
        let mut tables = self.tables.borrow_mut();
        if loot.inventory.is_empty() {
            tables.ground_loot.remove(&loot.coord);
        } else {
            tables.ground_loot.insert(loot.coord, loot);
        }
    }

    pub fn ground_loot_coords(&self) -> Vec<Coord> {
        let mut coords: Vec<Coord> = self.tables.borrow().ground_loot.keys().copied().collect();
        coords.sort();
        coords
    }

    // -- Building inventories --

    pub fn building_inventory(
        &self,
        building_id: BuildingId,
        account: &AccountName,
    ) -> Option<BuildingInventoryRow> {
        self.tables
            .borrow()
            .building_inventories
            .get(&(building_id, account.clone()))
            .cloned()
    }

    pub fn set_building_inventory(&self, row: BuildingInventoryRow) {
        let mut tables = self.tables.borrow_mut();
        let key = (row.building_id, row.account.clone());
        if row.inventory.is_empty() {
            tables.building_inventories.remove(&key);
        } else {
            tables.building_inventories.insert(key, row);
        }
    }

    /// Every inventory row for a building, ordered by account name.
    pub fn building_inventories_for(&self, building_id: BuildingId) -> Vec<BuildingInventoryRow> {
        self.tables
            .borrow()
            .building_inventories
            .iter()
            .filter(|((bid, _), _)| *bid == building_id)
            .map(|(_, row)| row.clone())
            .collect()
    }

    // -- Damage list --

    pub fn record_damage(&self, entry: DamageListEntry) {
        self.tables.borrow_mut().damage_list.push(entry);
    }

    pub fn damage_list_for_victim(&self, victim: shared_types::TargetKey) -> Vec<DamageListEntry> {
        self.tables
            .borrow()
            .damage_list
            .iter()
            .filter(|e| e.victim == victim)
            .copied()
            .collect()
    }

    /// Drops every entry older than `min_height`; called at the start
    /// of the combat phase to age the damage list out of its window.
    pub fn prune_damage_list(&self, min_height: u64) {
        self.tables
            .borrow_mut()
            .damage_list
            .retain(|e| e.height >= min_height);
    }

    pub fn clear_damage_list_for_victim(&self, victim: shared_types::TargetKey) {
        self.tables.borrow_mut().damage_list.retain(|e| e.victim != victim);
    }

    // -- Prize counters --

    pub fn prize_found(&self, name: &str) -> u64 {
        self.tables.borrow().prize_counters.get(name).map(|c| c.found).unwrap_or(0)
    }

    pub fn increment_prize(&self, name: &str) {
        let mut tables = self.tables.borrow_mut();
        let counter = tables
            .prize_counters
            .entry(name.to_string())
            .or_insert_with(|| PrizeCounter { name: name.to_string(), found: 0 });
        counter.found += 1;
    }

    // -- Trade orders --

    pub fn trade_orders_for_building(&self, building_id: BuildingId) -> Vec<TradeOrder> {
        self.tables
            .borrow()
            .trade_orders
            .iter()
            .filter(|o| o.building_id == building_id)
            .cloned()
            .collect()
    }

    pub fn add_trade_order(&self, order: TradeOrder) {
        self.tables.borrow_mut().trade_orders.push(order);
    }

    pub fn remove_trade_orders_for_building(&self, building_id: BuildingId) {
        self.tables
            .borrow_mut()
            .trade_orders
            .retain(|o| o.building_id != building_id);
    }
}

/// Accounts are keyed by name in `Tables`, but the checkout-tracking set
/// needs a `u64` per the shared `(kind, id)` key shape; fold the name
/// into a stable integer via FNV-1a rather than introducing a second
/// checked-out set just for accounts.
fn name_hash(name: &AccountName) -> u64 {
    let mut hash: u64 = 0xcbf29ce484222325;
    for byte in name.0.as_bytes() {
        hash ^= *byte as u64;
        hash = hash.wrapping_mul(0x100000001b3);
    }
    hash
}
