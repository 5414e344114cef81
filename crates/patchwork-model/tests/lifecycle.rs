//! Integration tests: creation, linking, and cascading death across the
//! turtle, link, breed, and patch registries.

use patchwork_core::Who;
use patchwork_model::{LinkBreedDef, Model, ModelError};
use patchwork_test_utils::{assert_close, small_world, square_config, zoo};

// ── Scenario tests ──────────────────────────────────────────────

#[test]
fn killing_a_tow_source_removes_the_tow() {
    let mut m = Model::new(
        square_config(1, false).directed_link_breed(LinkBreedDef::new("tow")),
    )
    .unwrap();
    let pair = m.create_turtles(2, "").unwrap();
    let t0 = m.turtle_by_who(0).unwrap();
    let t1 = m.turtle_by_who(1).unwrap();
    assert_eq!(pair.to_vec(), vec![t0, t1]);

    let tow = m.create_link_to(t0, t1, "tow").unwrap();
    assert_eq!(m.link_neighbors(t1, "").to_vec(), vec![t0]);

    m.kill_turtle(t0).unwrap();

    assert!(m.link(tow).is_none());
    assert_eq!(m.link_count(), 0);
    assert!(m.links_of("tow", true).unwrap().is_empty());
    assert!(m.turtle(t1).is_some());
    assert!(m.turtle_by_who(0).is_none());
    assert!(m.link_neighbors(t1, "").is_empty());
    assert!(m.link_neighbors(t1, "tow").is_empty());
}

#[test]
fn ordered_turtles_are_spaced_45_degrees() {
    let mut m = small_world(true);
    let ring = m.create_ordered_turtles(8, "").unwrap();
    for (i, t) in ring.iter().enumerate() {
        assert_close(m.turtle(t).unwrap().heading(), 45.0 * i as f64);
    }
}

#[test]
fn who_numbers_are_consecutive_and_never_reused() {
    let mut m = zoo(1);
    m.create_turtles(3, "wolves").unwrap();
    let first = m.turtle_by_who(0).unwrap();
    m.kill_turtle(first).unwrap();
    let sheep = m.create_turtles(2, "sheep").unwrap();
    let whos: Vec<Who> = sheep.iter().map(|t| m.turtle(t).unwrap().who()).collect();
    assert_eq!(whos, vec![Who(3), Who(4)]);

    m.clear_turtles();
    let next = m.create_turtles(1, "").unwrap().first().unwrap();
    assert_eq!(m.turtle(next).unwrap().who(), Who(5));
}

#[test]
fn unknown_breed_allocates_nothing() {
    let mut m = zoo(1);
    assert_eq!(
        m.create_turtles(4, "cows"),
        Err(ModelError::UnknownBreed { name: "cows".into() })
    );
    assert_eq!(m.turtle_count(), 0);
    let t = m.create_turtles(1, "").unwrap().first().unwrap();
    assert_eq!(m.turtle(t).unwrap().who(), Who(0));
}

// ── Link uniqueness tests ───────────────────────────────────────

#[test]
fn duplicate_links_are_rejected_without_mutation() {
    let mut m = zoo(2);
    let pack = m.create_turtles(2, "wolves").unwrap().to_vec();
    let (a, b) = (pack[0], pack[1]);

    m.create_link_to(a, b, "streets").unwrap();
    let before = m.link_count();
    assert!(matches!(
        m.create_link_to(a, b, "streets"),
        Err(ModelError::DuplicateLink { .. })
    ));
    assert_eq!(m.link_count(), before);
    assert_eq!(m.links_of("streets", true).unwrap().len(), 1);

    // The reverse direction and other breeds are distinct links.
    m.create_link_to(b, a, "streets").unwrap();
    m.create_link_with(a, b, "friendships").unwrap();
    m.create_link_with(a, b, "").unwrap();
    assert!(matches!(
        m.create_link_with(b, a, "friendships"),
        Err(ModelError::DuplicateLink { .. })
    ));
    assert_eq!(m.link_count(), 4);
    assert_eq!(m.link_degree(a), 4);
}

#[test]
fn set_forms_skip_failures() {
    let mut m = zoo(3);
    let herd = m.create_turtles(4, "sheep").unwrap();
    let hub = herd.first().unwrap();
    m.create_link_with(hub, herd.get(1).unwrap(), "friendships").unwrap();

    let created = m.create_links_with(hub, &herd, "friendships").unwrap();
    // The hub itself and the existing friend are skipped.
    assert_eq!(created.len(), 2);
    assert_eq!(m.link_neighbors(hub, "friendships").len(), 3);
}

// ── Cascade tests ───────────────────────────────────────────────

#[test]
fn kill_removes_exactly_the_incident_links() {
    let mut m = zoo(4);
    let ts = m.create_turtles(5, "wolves").unwrap().to_vec();
    m.create_link_to(ts[0], ts[1], "streets").unwrap();
    m.create_link_to(ts[2], ts[0], "streets").unwrap();
    m.create_link_with(ts[0], ts[3], "friendships").unwrap();
    m.create_link_with(ts[3], ts[4], "friendships").unwrap();
    m.create_link_to(ts[1], ts[2], "").unwrap();
    let before = m.link_count();

    m.kill_turtle(ts[0]).unwrap();

    assert_eq!(m.link_count(), before - 3);
    assert!(!m.turtles().contains(ts[0]));
    assert!(!m.turtles_of("wolves").unwrap().contains(ts[0]));
    assert!(!m.turtles_here(ts[1]).contains(ts[0]));
    for other in &ts[1..] {
        assert!(!m.link_neighbors(*other, "").contains(ts[0]));
        assert!(m.link_with(*other, ts[0], "").is_none());
    }
    assert_eq!(m.out_link_neighbors(ts[1], "").to_vec(), vec![ts[2]]);
    assert_eq!(m.link_neighbors(ts[3], "friendships").to_vec(), vec![ts[4]]);
    assert_eq!(m.kill_turtle(ts[0]), Err(ModelError::TurtleNotFound(ts[0])));
}

#[test]
fn clear_turtles_clears_links() {
    let mut m = zoo(5);
    let ts = m.create_turtles(3, "").unwrap().to_vec();
    m.create_link_with(ts[0], ts[1], "").unwrap();
    m.create_link_to(ts[1], ts[2], "streets").unwrap();
    m.clear_turtles();
    assert_eq!(m.turtle_count(), 0);
    assert_eq!(m.link_count(), 0);
    assert!(m.links_of("streets", true).unwrap().is_empty());
}

#[test]
fn ask_skips_turtles_killed_mid_batch() {
    let mut m = small_world(true);
    let all = m.create_turtles(4, "").unwrap();
    let full = all.to_vec();
    let mut visited = Vec::new();
    m.ask(&all, |m, t| {
        visited.push(t);
        if t == full[0] {
            m.kill_turtle(full[2]).unwrap();
            m.kill_turtle(full[3]).unwrap();
        }
        m.create_turtles(1, "").unwrap();
    });
    assert_eq!(visited, vec![full[0], full[1]]);
    assert_eq!(m.turtle_count(), 4);
}

#[test]
fn hatch_copies_and_breed_change_resets() {
    let mut m = zoo(6);
    let wolf = m.create_turtles(1, "wolves").unwrap().first().unwrap();
    m.set_xy(wolf, 2.5, -1.0).unwrap();
    m.turtle_mut(wolf).unwrap().set_own("hunger", 7.0);
    m.turtle_mut(wolf).unwrap().set_own("energy", 3.0);

    let pup = m.hatch(wolf, 1).unwrap().first().unwrap();
    let p = m.turtle(pup).unwrap();
    assert_eq!(p.breed(), "wolves");
    assert_eq!(p.own_number("hunger"), Some(7.0));
    assert_close(p.xcor(), 2.5);
    assert_eq!(p.shape(), "wolf");
    assert_eq!(m.turtles_of("wolves").unwrap().len(), 2);

    m.set_breed(pup, "sheep").unwrap();
    let p = m.turtle(pup).unwrap();
    assert_eq!(p.own("hunger"), None);
    assert_eq!(p.own_number("wool"), Some(1.0));
    assert_eq!(p.own_number("energy"), Some(3.0));
    assert_eq!(m.turtles_of("sheep").unwrap().to_vec(), vec![pup]);
    let here = m.turtle(pup).unwrap().patch_here();
    assert!(m.patch(here).unwrap().breed_here("sheep").unwrap().contains(pup));
}
