use crate::damage::{apply_shield_armour_split, deal_combat_damage};
use gsp_config::{Chain, Context, RoConfig};
use gsp_hexgrid::Coord;
use gsp_prng::DeterministicRng;
use gsp_store::domain::common::{CombatData, Inventory, MiningData, MovementData, RegenData};
use gsp_store::domain::entities::{Character, Location};
use gsp_store::Store;
use shared_types::{AccountName, CharacterId, Faction, TargetKey};
use std::sync::Arc;

fn test_context() -> Context {
    Context::new(Chain::Regtest, 1, 0, Arc::new(RoConfig::test_fixture()))
}

fn fighter(id: u64, faction: Faction, at: Coord, weapon: &str, target: Option<TargetKey>) -> Character {
    Character {
        id: CharacterId(id),
        owner: AccountName("alice".to_string()),
        faction,
        location: Location::Map(at),
        enter_building_id: None,
        busy_blocks: 0,
        ongoing_op_id: None,
        is_moving: false,
        is_mining: false,
        attack_range: 4,
        can_regen: true,
        hp: 1000,
        max_hp: 1000,
        regen: RegenData::default(),
        vehicle_type: "basic_tank".to_string(),
        fitments: Vec::new(),
        attacks: vec![weapon.to_string()],
        self_destruct: None,
        movement: MovementData::default(),
        combat: CombatData { max_shield: 500, shield: 500, target, ..CombatData::default() },
        mining: MiningData { active: false },
        speed: 10,
        cargo_space: 100,
        inventory: Inventory::new(),
    }
}

#[test]
fn armour_is_untouched_while_shield_survives() {
    // A big enough shield pool absorbs its configured percentage of
    // `dmg` without breaking; armour takes nothing at all this hit.
    let (shield, armour) = apply_shield_armour_split(100, 50, 100, 1000, 1000);
    assert_eq!(shield, 50);
    assert_eq!(armour, 0);
}

#[test]
fn shield_split_is_capped_by_remaining_shield() {
    let (shield, armour) = apply_shield_armour_split(100, 100, 100, 20, 1000);
    assert_eq!(shield, 20);
    assert_eq!(armour, 80);
}

#[test]
fn partial_shield_percent_never_leaks_residue_to_armour_while_shield_holds() {
    // dmg=7, shield_percent=30: available_for_shield = floor(7*30/100) = 2,
    // which doesn't exhaust a shield pool of 100 — armour must stay at 0
    // rather than absorbing a rounding residue from the shield split.
    let (shield, armour) = apply_shield_armour_split(7, 30, 100, 100, 50);
    assert_eq!(shield, 2);
    assert_eq!(armour, 0);
}

#[test]
fn autocannon_hit_damages_the_target() {
    let store = Store::new();
    let ctx = test_context();
    let mut rng = DeterministicRng::from_bytes(b"damage-test");

    let attacker_key = TargetKey::character(CharacterId(2));
    store.insert_character(fighter(1, Faction::Red, Coord::new(0, 0), "autocannon", Some(attacker_key)));
    store.insert_character(fighter(2, Faction::Green, Coord::new(0, 0), "autocannon", None));

    let dead = deal_combat_damage(&store, &ctx, &mut rng);
    assert!(dead.is_empty());

    let victim = store.checkout_character(CharacterId(2)).unwrap();
    assert!(victim.hp < 1000 || victim.combat.shield < 500);
}

#[test]
fn fully_depleted_victim_with_single_attacker_refunds_gain_hp() {
    let store = Store::new();
    let ctx = test_context();
    let mut rng = DeterministicRng::from_bytes(b"damage-test-gain-hp");

    let victim_key = TargetKey::character(CharacterId(2));
    let mut attacker = fighter(1, Faction::Red, Coord::new(0, 0), "syphon", Some(victim_key));
    attacker.hp = 500;
    let mut victim = fighter(2, Faction::Green, Coord::new(0, 0), "syphon", None);
    victim.hp = 1;
    victim.combat.shield = 0;
    store.insert_character(attacker);
    store.insert_character(victim);

    deal_combat_damage(&store, &ctx, &mut rng);

    let attacker_after = store.checkout_character(CharacterId(1)).unwrap();
    assert_eq!(attacker_after.hp, 501);
}

#[test]
fn two_attackers_that_exactly_exhaust_a_shield_both_miss_the_refund() {
    // Scenario: two syphon attackers drain a target's shield
    // simultaneously for exactly its full amount. Reconciliation must
    // deny recovery to both, since the target's shield (the drained
    // pool) is left at zero and more than one attacker contributed.
    let mut config = RoConfig::test_fixture();
    config.weapons.get_mut("syphon").unwrap().min_damage = 25;
    config.weapons.get_mut("syphon").unwrap().max_damage = 25;
    let ctx = Context::new(Chain::Regtest, 1, 0, Arc::new(config));

    let store = Store::new();
    let mut rng = DeterministicRng::from_bytes(b"damage-test-exhaustion");

    let victim_key = TargetKey::character(CharacterId(3));
    let mut attacker_one = fighter(1, Faction::Red, Coord::new(0, 0), "syphon", Some(victim_key));
    attacker_one.hp = 500;
    let mut attacker_two = fighter(2, Faction::Red, Coord::new(0, 0), "syphon", Some(victim_key));
    attacker_two.hp = 500;
    let mut victim = fighter(3, Faction::Green, Coord::new(0, 0), "syphon", None);
    victim.combat.shield = 50;
    store.insert_character(attacker_one);
    store.insert_character(attacker_two);
    store.insert_character(victim);

    deal_combat_damage(&store, &ctx, &mut rng);

    let victim_after = store.checkout_character(CharacterId(3)).unwrap();
    assert_eq!(victim_after.combat.shield, 0);
    drop(victim_after);

    let attacker_one_after = store.checkout_character(CharacterId(1)).unwrap();
    assert_eq!(attacker_one_after.hp, 500);
    let attacker_two_after = store.checkout_character(CharacterId(2)).unwrap();
    assert_eq!(attacker_two_after.hp, 500);
}

#[test]
fn self_destruct_cascade_kills_nearby_enemies() {
    let store = Store::new();
    let ctx = test_context();
    let mut rng = DeterministicRng::from_bytes(b"damage-test-cascade");

    let mut bomber = fighter(1, Faction::Red, Coord::new(0, 0), "autocannon", None);
    bomber.hp = 0;
    bomber.combat.shield = 0;
    bomber.self_destruct = Some("self_destruct_charge".to_string());
    let mut victim = fighter(2, Faction::Green, Coord::new(0, 0), "autocannon", None);
    victim.hp = 10;
    victim.combat.shield = 0;
    store.insert_character(bomber);
    store.insert_character(victim);

    let dead = deal_combat_damage(&store, &ctx, &mut rng);
    assert!(dead.contains(&TargetKey::character(CharacterId(1))));
    assert!(dead.contains(&TargetKey::character(CharacterId(2))));
}
