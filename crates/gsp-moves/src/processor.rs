use crate::schema::{AdminCommand, MoveCommand};
use gsp_config::Context;
use gsp_hexgrid::Coord;
use gsp_map::MapOracle;
use gsp_store::domain::entities::{
    Building, Character, Location, OngoingOp, OngoingOpVariant, Region, TradeOrder, TradeSide,
};
use gsp_store::domain::{CombatData, MiningData, MovementData, RegenData};
use gsp_store::Store;
use shared_types::{AccountName, BuildingId, CharacterId, Faction, GspError, GspResult};
use tracing::debug;

/// Applies every admin move, in array order, then every player move, in
/// block order. A command that fails validation is logged at debug and
/// otherwise has no effect; it never aborts the remaining commands in
/// the batch.
pub fn process_admin_and_player_moves(
    store: &Store,
    ctx: &Context,
    map: &dyn MapOracle,
    admin: &[crate::schema::AdminMove],
    moves: &[crate::schema::PlayerMove],
) {
    for mv in admin {
        if let Err(err) = apply_admin(store, &mv.command) {
            debug!(?err, "admin move rejected");
        }
    }
    for mv in moves {
        let owner = AccountName(mv.name.clone());
        if let Err(err) = apply_player_move(store, ctx, map, &owner, &mv.command) {
            debug!(?err, account = %owner, "player move rejected");
        }
    }
}

fn apply_admin(store: &Store, cmd: &AdminCommand) -> GspResult<()> {
    match cmd {
        AdminCommand::GrantCoin { account, amount } => {
            let name = AccountName(account.clone());
            let mut handle = store
                .checkout_account(&name)
                .ok_or_else(|| GspError::UnknownAccount(account.clone()))?;
            handle.coin_balance = handle.coin_balance.saturating_add(*amount);
            Ok(())
        }
        AdminCommand::GrantPrize { account, prize } => {
            let name = AccountName(account.clone());
            let mut handle = store
                .checkout_account(&name)
                .ok_or_else(|| GspError::UnknownAccount(account.clone()))?;
            handle.banked_goods.add(prize, 1);
            Ok(())
        }
        AdminCommand::SetRegionResource { region, amount } => {
            let region_id = shared_types::RegionId(*region);
            if let Some(mut handle) = store.checkout_region(region_id) {
                handle.resource_left = *amount;
            } else {
                store.insert_region(Region {
                    id: region_id,
                    modified_height: 0,
                    resource_left: *amount,
                    prospecting_character: None,
                    prospection_result: None,
                });
            }
            Ok(())
        }
    }
}

fn apply_player_move(
    store: &Store,
    ctx: &Context,
    map: &dyn MapOracle,
    owner: &AccountName,
    cmd: &MoveCommand,
) -> GspResult<()> {
    match cmd {
        MoveCommand::RegisterAccount { faction } => register_account(store, owner, faction),
        MoveCommand::CreateCharacter { vehicle_type } => {
            create_character(store, ctx, owner, vehicle_type)
        }
        MoveCommand::SetWaypoints { character_id, waypoints } => {
            set_waypoints(store, map, owner, *character_id, waypoints)
        }
        MoveCommand::PickUpLoot { character_id, item, quantity } => {
            pick_up_loot(store, owner, *character_id, item, *quantity)
        }
        MoveCommand::DropLoot { character_id, item, quantity } => {
            drop_loot(store, owner, *character_id, item, *quantity)
        }
        MoveCommand::ConfigureFitments { character_id, fitments } => {
            configure_fitments(store, owner, *character_id, fitments)
        }
        MoveCommand::StartProspection { character_id } => {
            start_prospection(store, ctx, owner, *character_id)
        }
        MoveCommand::StartConstruction { character_id, building_type } => {
            start_construction(store, ctx, owner, *character_id, building_type)
        }
        MoveCommand::EnterBuilding { character_id, building_id } => {
            request_enter_building(store, owner, *character_id, *building_id)
        }
        MoveCommand::ExitBuilding { character_id } => exit_building(store, map, owner, *character_id),
        MoveCommand::ConfigureBuilding { building_id, config } => {
            configure_building(store, ctx, owner, *building_id, config)
        }
        MoveCommand::PlaceTradeOrder { building_id, side, item, quantity, unit_price } => {
            place_trade_order(store, owner, *building_id, side, item, *quantity, *unit_price)
        }
        MoveCommand::CancelTradeOrder { building_id, item } => {
            cancel_trade_order(store, owner, *building_id, item)
        }
    }
}

fn parse_faction(s: &str) -> GspResult<Faction> {
    match s {
        "red" => Ok(Faction::Red),
        "green" => Ok(Faction::Green),
        "blue" => Ok(Faction::Blue),
        "yellow" => Ok(Faction::Yellow),
        other => Err(GspError::Malformed(format!("unknown faction {other}"))),
    }
}

fn register_account(store: &Store, owner: &AccountName, faction: &str) -> GspResult<()> {
    if store.account_exists(owner) {
        return Err(GspError::AccountAlreadyExists(owner.0.clone()));
    }
    let faction = parse_faction(faction)?;
    if !faction.is_playable() {
        return Err(GspError::Malformed("registration faction must be playable".into()));
    }
    store.insert_account(gsp_store::domain::entities::Account::new(owner.clone(), faction));
    Ok(())
}

fn owned_character(store: &Store, owner: &AccountName, character_id: u64) -> GspResult<gsp_store::Handle<Character>> {
    let id = CharacterId(character_id);
    let handle = store.checkout_character(id).ok_or(GspError::UnknownCharacter(character_id))?;
    if &handle.owner != owner {
        return Err(GspError::NotOwner);
    }
    Ok(handle)
}

fn create_character(
    store: &Store,
    ctx: &Context,
    owner: &AccountName,
    vehicle_type: &str,
) -> GspResult<()> {
    let account = store.checkout_account(owner).ok_or_else(|| GspError::UnknownAccount(owner.0.clone()))?;
    let faction = account.faction;
    drop(account);

    let limit = ctx.config.character_limit_per_account;
    let owned_count = store
        .character_ids()
        .into_iter()
        .filter(|id| {
            store
                .checkout_character(*id)
                .map(|h| {
                    let is_owner = h.owner == *owner;
                    is_owner
                })
                .unwrap_or(false)
        })
        .count() as u32;
    if owned_count >= limit {
        return Err(GspError::CharacterLimitReached { account: owner.0.clone(), limit });
    }

    let vehicle = ctx
        .config
        .vehicles
        .get(vehicle_type)
        .ok_or_else(|| GspError::Malformed(format!("unknown vehicle type {vehicle_type}")))?;

    let id = store.alloc_character_id();
    store.insert_character(Character {
        id,
        owner: owner.clone(),
        faction,
        location: Location::Map(Coord::new(0, 0)),
        enter_building_id: None,
        busy_blocks: 0,
        ongoing_op_id: None,
        is_moving: false,
        is_mining: false,
        attack_range: vehicle.attack_range,
        can_regen: true,
        hp: vehicle.max_hp,
        max_hp: vehicle.max_hp,
        regen: RegenData::default(),
        vehicle_type: vehicle_type.to_string(),
        fitments: Vec::new(),
        attacks: vehicle.attacks.clone(),
        self_destruct: vehicle.self_destruct.clone(),
        movement: MovementData::default(),
        combat: CombatData {
            max_shield: vehicle.max_shield,
            shield: vehicle.max_shield,
            ..CombatData::default()
        },
        mining: MiningData { active: false },
        speed: vehicle.speed,
        cargo_space: vehicle.cargo_space,
        inventory: gsp_store::domain::Inventory::new(),
    });
    Ok(())
}

fn set_waypoints(
    store: &Store,
    map: &dyn MapOracle,
    owner: &AccountName,
    character_id: u64,
    waypoints: &[Coord],
) -> GspResult<()> {
    let mut handle = owned_character(store, owner, character_id)?;
    if handle.busy_blocks > 0 {
        return Err(GspError::CharacterBusy(character_id));
    }
    if !matches!(handle.location, Location::Map(_)) {
        return Err(GspError::CharacterNotOnMap(character_id));
    }
    for wp in waypoints {
        if !map.is_on_map(*wp) {
            return Err(GspError::Unreachable);
        }
    }
    handle.movement.waypoints = waypoints.to_vec();
    handle.movement.steps.clear();
    handle.movement.partial_step = 0;
    handle.movement.blocked_turns = 0;
    handle.is_moving = !waypoints.is_empty();
    Ok(())
}

fn pick_up_loot(
    store: &Store,
    owner: &AccountName,
    character_id: u64,
    item: &str,
    quantity: u64,
) -> GspResult<()> {
    let mut handle = owned_character(store, owner, character_id)?;
    let Location::Map(coord) = handle.location else {
        return Err(GspError::CharacterNotOnMap(character_id));
    };
    let Some(mut loot) = store.ground_loot_at(coord) else {
        return Err(GspError::InsufficientInventory);
    };
    let taken = loot.inventory.remove(item, quantity);
    if taken == 0 {
        return Err(GspError::InsufficientInventory);
    }
    handle.inventory.add(item, taken);
    store.set_ground_loot(loot);
    Ok(())
}

fn drop_loot(
    store: &Store,
    owner: &AccountName,
    character_id: u64,
    item: &str,
    quantity: u64,
) -> GspResult<()> {
    let mut handle = owned_character(store, owner, character_id)?;
    let Location::Map(coord) = handle.location else {
        return Err(GspError::CharacterNotOnMap(character_id));
    };
    let taken = handle.inventory.remove(item, quantity);
    if taken == 0 {
        return Err(GspError::InsufficientInventory);
    }
    let mut loot = store
        .ground_loot_at(coord)
        .unwrap_or(gsp_store::domain::entities::GroundLoot { coord, inventory: gsp_store::domain::Inventory::new() });
    loot.inventory.add(item, taken);
    store.set_ground_loot(loot);
    Ok(())
}

fn configure_fitments(
    store: &Store,
    owner: &AccountName,
    character_id: u64,
    fitments: &[String],
) -> GspResult<()> {
    let mut handle = owned_character(store, owner, character_id)?;
    if handle.busy_blocks > 0 {
        return Err(GspError::CharacterBusy(character_id));
    }
    handle.fitments = fitments.to_vec();
    Ok(())
}

fn start_prospection(store: &Store, ctx: &Context, owner: &AccountName, character_id: u64) -> GspResult<()> {
    let mut handle = owned_character(store, owner, character_id)?;
    if handle.busy_blocks > 0 {
        return Err(GspError::CharacterBusy(character_id));
    }
    let Location::Map(coord) = handle.location else {
        return Err(GspError::CharacterNotOnMap(character_id));
    };

    // Region rows are materialised lazily; an absent row just means
    // nobody has prospected here yet.
    let region_id = shared_types::RegionId(gsp_hexgrid::region_key_for(coord));
    let mut region = store.checkout_region(region_id).unwrap_or_else(|| {
        store.insert_region(Region {
            id: region_id,
            modified_height: ctx.height,
            resource_left: 0,
            prospecting_character: None,
            prospection_result: None,
        });
        store.checkout_region(region_id).expect("just inserted")
    });
    if region.prospecting_character.is_some() {
        return Err(GspError::Malformed("region is already being prospected".into()));
    }
    region.prospecting_character = Some(CharacterId(character_id));

    let op_id = store.alloc_ongoing_op_id();
    store.insert_ongoing_op(OngoingOp {
        id: op_id,
        height_of_next_processing: ctx.height + ctx.config.prospecting_blocks as u64,
        character_id: Some(CharacterId(character_id)),
        building_id: None,
        variant: OngoingOpVariant::Prospection,
    });
    handle.busy_blocks = ctx.config.prospecting_blocks;
    handle.ongoing_op_id = Some(op_id);
    Ok(())
}

/// Deterministic region key for a coordinate, used when the map oracle
/// itself doesn't carry a `region_id` for the tile yet. Production
/// regions come from the static base-map tile data instead.
fn coord_to_region_key(coord: Coord) -> u64 {
    ((coord.x as i64) << 32 ^ (coord.y as i64)) as u64
}

fn start_construction(
    store: &Store,
    ctx: &Context,
    owner: &AccountName,
    character_id: u64,
    building_type: &str,
) -> GspResult<()> {
    let mut handle = owned_character(store, owner, character_id)?;
    if handle.busy_blocks > 0 {
        return Err(GspError::CharacterBusy(character_id));
    }
    let Location::Map(coord) = handle.location else {
        return Err(GspError::CharacterNotOnMap(character_id));
    };
    let building_cfg = ctx
        .config
        .buildings
        .get(building_type)
        .ok_or_else(|| GspError::Malformed(format!("unknown building type {building_type}")))?;

    let building_id = store.alloc_building_id();
    store.insert_building(Building {
        id: building_id,
        building_type: building_type.to_string(),
        owner: Some(owner.clone()),
        faction: handle.faction,
        centre: coord,
        hp: 1,
        max_hp: building_cfg.max_hp,
        regen: RegenData::default(),
        can_regen: false,
        attack_range: 0,
        combat: CombatData::default(),
        attacks: Vec::new(),
        self_destruct: None,
        is_foundation: true,
        construction_inventory: gsp_store::domain::Inventory::new(),
        rotation: 0,
        ongoing_construction_id: None,
        config: String::new(),
    });

    let op_id = store.alloc_ongoing_op_id();
    store.insert_ongoing_op(OngoingOp {
        id: op_id,
        height_of_next_processing: ctx.height + building_cfg.construction_blocks as u64,
        character_id: Some(CharacterId(character_id)),
        building_id: Some(building_id),
        variant: OngoingOpVariant::BuildingConstruction { building_type: building_type.to_string() },
    });

    let mut building = store.checkout_building(building_id).expect("just inserted");
    building.ongoing_construction_id = Some(op_id);
    drop(building);

    handle.busy_blocks = building_cfg.construction_blocks;
    handle.ongoing_op_id = Some(op_id);
    Ok(())
}

fn request_enter_building(
    store: &Store,
    owner: &AccountName,
    character_id: u64,
    building_id: u64,
) -> GspResult<()> {
    let mut handle = owned_character(store, owner, character_id)?;
    if handle.busy_blocks > 0 {
        return Err(GspError::CharacterBusy(character_id));
    }
    if !matches!(handle.location, Location::Map(_)) {
        return Err(GspError::CharacterNotOnMap(character_id));
    }
    if !store.building_exists(BuildingId(building_id)) {
        return Err(GspError::UnknownBuilding(building_id));
    }
    // Actual entry happens later in the pipeline's building-entry
    // phase, so same-block movement can still land the character
    // adjacent to the building before it takes effect.
    handle.enter_building_id = Some(BuildingId(building_id));
    Ok(())
}

fn exit_building(store: &Store, map: &dyn MapOracle, owner: &AccountName, character_id: u64) -> GspResult<()> {
    let mut handle = owned_character(store, owner, character_id)?;
    let Location::Building(building_id) = handle.location else {
        return Err(GspError::Malformed("character is not inside a building".into()));
    };
    let building = store.checkout_building(building_id).ok_or(GspError::UnknownBuilding(building_id.0))?;
    let centre = building.centre;
    drop(building);
    if !map.is_passable(centre) {
        return Err(GspError::Unreachable);
    }
    handle.location = Location::Map(centre);
    Ok(())
}

fn configure_building(
    store: &Store,
    ctx: &Context,
    owner: &AccountName,
    building_id: u64,
    config: &str,
) -> GspResult<()> {
    let building_id = BuildingId(building_id);
    let building = store.checkout_building(building_id).ok_or(GspError::UnknownBuilding(building_id.0))?;
    if building.owner.as_ref() != Some(owner) {
        return Err(GspError::NotOwner);
    }
    drop(building);

    // The change is staged as an ongoing op and swapped in atomically
    // by the finaliser; the move itself never mutates `config` directly.
    let op_id = store.alloc_ongoing_op_id();
    store.insert_ongoing_op(OngoingOp {
        id: op_id,
        height_of_next_processing: ctx.height + 1,
        character_id: None,
        building_id: Some(building_id),
        variant: OngoingOpVariant::BuildingConfigUpdate { new_config: config.to_string() },
    });
    Ok(())
}

fn place_trade_order(
    store: &Store,
    owner: &AccountName,
    building_id: u64,
    side: &str,
    item: &str,
    quantity: u64,
    unit_price: u64,
) -> GspResult<()> {
    if quantity == 0 || quantity > shared_types::MAX_QUANTITY {
        return Err(GspError::QuantityOutOfBounds(quantity, shared_types::MAX_QUANTITY));
    }
    let side = match side {
        "bid" => TradeSide::Bid,
        "ask" => TradeSide::Ask,
        other => return Err(GspError::Malformed(format!("unknown trade side {other}"))),
    };
    let building_id = BuildingId(building_id);
    if !store.building_exists(building_id) {
        return Err(GspError::UnknownBuilding(building_id.0));
    }

    let reserved_amount = match side {
        TradeSide::Bid => {
            let mut account = store.checkout_account(owner).ok_or_else(|| GspError::UnknownAccount(owner.0.clone()))?;
            let cost = unit_price.saturating_mul(quantity);
            if account.coin_balance < cost {
                return Err(GspError::InsufficientInventory);
            }
            account.coin_balance -= cost;
            cost
        }
        TradeSide::Ask => {
            let mut inv_row = store
                .building_inventory(building_id, owner)
                .ok_or(GspError::InsufficientInventory)?;
            let taken = inv_row.inventory.remove(item, quantity);
            if taken != quantity {
                return Err(GspError::InsufficientInventory);
            }
            store.set_building_inventory(inv_row);
            quantity
        }
    };

    store.add_trade_order(TradeOrder {
        building_id,
        account: owner.clone(),
        side,
        item: item.to_string(),
        quantity,
        unit_price,
        reserved_amount,
    });
    Ok(())
}

fn cancel_trade_order(store: &Store, owner: &AccountName, building_id: u64, item: &str) -> GspResult<()> {
    let building_id = BuildingId(building_id);
    let orders = store.trade_orders_for_building(building_id);
    let Some(order) = orders.into_iter().find(|o| &o.account == owner && o.item == item) else {
        return Err(GspError::Malformed("no matching trade order".into()));
    };
    match order.side {
        TradeSide::Bid => {
            let mut account = store.checkout_account(owner).ok_or_else(|| GspError::UnknownAccount(owner.0.clone()))?;
            account.coin_balance = account.coin_balance.saturating_add(order.reserved_amount);
        }
        TradeSide::Ask => {
            let mut inv_row = store
                .building_inventory(building_id, owner)
                .unwrap_or(gsp_store::domain::entities::BuildingInventoryRow {
                    building_id,
                    account: owner.clone(),
                    inventory: gsp_store::domain::Inventory::new(),
                });
            inv_row.inventory.add(item, order.reserved_amount);
            store.set_building_inventory(inv_row);
        }
    }
    store.remove_trade_orders_for_building(building_id);
    for remaining in orders_except(store, building_id, owner, item) {
        store.add_trade_order(remaining);
    }
    Ok(())
}

fn orders_except(store: &Store, building_id: BuildingId, owner: &AccountName, item: &str) -> Vec<TradeOrder> {
    store
        .trade_orders_for_building(building_id)
        .into_iter()
        .filter(|o| !(&o.account == owner && o.item == item))
        .collect()
}
