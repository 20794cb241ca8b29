use super::*;

#[test]
fn distance_is_symmetric_and_zero_at_self() {
    let a = Coord::new(2, -3);
    let b = Coord::new(-1, 4);
    assert_eq!(a.distance(a), 0);
    assert_eq!(a.distance(b), b.distance(a));
}

#[test]
fn neighbours_are_all_distance_one() {
    let c = Coord::new(5, -2);
    for n in c.neighbours() {
        assert_eq!(c.distance(n), 1);
    }
}

#[test]
fn ball_radius_zero_is_just_self() {
    let c = Coord::new(1, 1);
    assert_eq!(c.ball(0), vec![c]);
}

#[test]
fn ball_contains_exactly_the_tiles_within_radius() {
    let c = Coord::new(0, 0);
    let ball = c.ball(2);
    for coord in &ball {
        assert!(c.distance(*coord) <= 2);
    }
    // every tile at distance <= 2 generated by brute force must appear
    for x in -2..=2 {
        for y in -2..=2 {
            let cand = Coord::new(x, y);
            if c.distance(cand) <= 2 {
                assert!(ball.contains(&cand));
            }
        }
    }
}

#[test]
fn ball_is_sorted_lexicographically() {
    let ball = Coord::new(0, 0).ball(3);
    let mut sorted = ball.clone();
    sorted.sort_by(coord_order);
    assert_eq!(ball, sorted);
}
