use std::f32::consts::PI;
use std::sync::Arc;

use arena_content::CatalogLoader;
use arena_core::{
    Action, ActionCatalog, Affine3A, BodyPart, BodyPose, ContestantId, Quat, Reach, Vec3,
};
use runtime::{Contestant, ContestantConfig, EnvInfoPacket, Snapshot, rng_from_str};

fn facing_pair(separation: f32) -> (BodyPose, BodyPose) {
    let jack = BodyPose::standing(Affine3A::IDENTITY);
    let jill = BodyPose::standing(Affine3A::from_rotation_translation(
        Quat::from_rotation_z(PI),
        Vec3::new(0.0, separation, 0.0),
    ));
    (jack, jill)
}

fn snapshot(poses: &[(ContestantId, BodyPose)]) -> Snapshot {
    poses
        .iter()
        .map(|&(id, pose)| (id, EnvInfoPacket::new(id, pose)))
        .collect()
}

fn jack(catalog: &ActionCatalog, pose: BodyPose) -> Contestant {
    let config = ContestantConfig::new("Jack").with_reach(Reach::default());
    let mut jack = Contestant::new(ContestantId(0), config, catalog).unwrap();
    jack.set_pose(pose);
    jack
}

/// Two contestants standing on top of each other with a 0.7 hand reach: the
/// seeded choice must include a head jab at the other contestant.
#[test]
fn jab_head_targets_the_other_head_within_reach() {
    let catalog = CatalogLoader::load().unwrap();
    let (jack_pose, jill_pose) = facing_pair(0.0);
    let jill = ContestantId(1);
    let state = snapshot(&[(ContestantId(0), jack_pose), (jill, jill_pose)]);

    let mut jack = jack(&catalog, jack_pose);
    let mut rng = rng_from_str("Hello world!");
    let actions = jack.choose_actions(&state, &mut rng).unwrap();

    let jab = actions
        .iter()
        .find(|action| action.name() == "jab head")
        .expect("every attack Jack knows ends in a head jab");
    assert_eq!(jab.victim(), Some(jill));
    assert!(jab.involves_part(BodyPart::HandL));

    let anchor = jack_pose.locations.hand_l;
    let strike = jab.strike_location(BodyPart::HandL).unwrap();
    let reach = Reach::default().for_part(BodyPart::HandL).unwrap();
    assert!(anchor.distance(strike) <= reach + 1e-4);

    let towards_head = (jill_pose.locations.head - anchor).normalize();
    assert!((strike - anchor).normalize().dot(towards_head) > 0.9999);
}

#[test]
fn selected_attacks_reach_the_victim() {
    let catalog = CatalogLoader::load().unwrap();
    let jab_reach = 0.7;
    let step_jab_reach = 0.7 * 1.5;

    for separation in [0.0, 0.3, 0.6, 0.9, 1.0] {
        let (jack_pose, jill_pose) = facing_pair(separation);
        let state = snapshot(&[(ContestantId(0), jack_pose), (ContestantId(1), jill_pose)]);
        let mut jack = jack(&catalog, jack_pose);
        let mut rng = rng_from_str(&format!("separation {separation}"));

        for _ in 0..10 {
            let actions = jack.choose_actions(&state, &mut rng).unwrap();
            assert!(!actions.is_empty());
            let distance = actions[0].max_range();
            assert!((distance - separation).abs() < 1e-4);
            let reach = if actions.len() == 1 {
                jab_reach
            } else {
                step_jab_reach
            };
            assert!(reach >= distance);
        }
    }
}

#[test]
fn nothing_reaches_past_the_longest_attack() {
    let catalog = CatalogLoader::load().unwrap();
    let (jack_pose, jill_pose) = facing_pair(1.2);
    let state = snapshot(&[(ContestantId(0), jack_pose), (ContestantId(1), jill_pose)]);
    let mut jack = jack(&catalog, jack_pose);
    let mut rng = rng_from_str("far");

    assert!(jack.choose_actions(&state, &mut rng).unwrap().is_empty());
    assert!(jack.current_actions().is_empty());
}

/// A victim pose that is not a number compares false against every reach, so
/// no attack qualifies and nothing is chosen.
#[test]
fn victim_at_undefined_distance_gets_no_attack() {
    let catalog = CatalogLoader::load().unwrap();
    let (jack_pose, _) = facing_pair(0.0);
    let lost = BodyPose::standing(Affine3A::from_translation(Vec3::splat(f32::NAN)));
    let state = snapshot(&[(ContestantId(0), jack_pose), (ContestantId(1), lost)]);
    let mut jack = jack(&catalog, jack_pose);
    let mut rng = rng_from_str("nowhere");

    assert!(jack.choose_actions(&state, &mut rng).unwrap().is_empty());
}

#[test]
fn known_attacks_stay_sorted_while_learning() {
    let catalog = CatalogLoader::load().unwrap();
    let (jack_pose, _) = facing_pair(0.0);
    let mut jack = jack(&catalog, jack_pose);
    assert!(jack.known_attacks().is_sorted());

    let jab = Arc::clone(catalog.get("JAB_HEAD").unwrap());
    let combo = Arc::clone(catalog.get("STEP_JAB_HEAD").unwrap());
    for reach in [2.0, 0.1, 0.85, 0.7, 1.05] {
        jack.learn_attack(Arc::clone(&jab), reach).unwrap();
        jack.learn_attack(Arc::clone(&combo), reach * 1.5).unwrap();
        assert!(jack.known_attacks().is_sorted());
    }
    assert_eq!(jack.known_attacks().len(), 12);
    assert_eq!(jack.known_attacks().longest(), Some(3.0));

    assert!(jack.learn_attack(Arc::clone(&jab), f32::NAN).is_err());
    assert!(jack.known_attacks().is_sorted());
    assert_eq!(jack.known_attacks().len(), 12);
}

#[test]
fn explicit_template_skips_reach_checks() {
    let catalog = CatalogLoader::load().unwrap();
    let (jack_pose, jill_pose) = facing_pair(5.0);
    let jill = ContestantId(1);
    let state = snapshot(&[(ContestantId(0), jack_pose), (jill, jill_pose)]);
    let mut jack = jack(&catalog, jack_pose);

    let combo = Arc::clone(catalog.get("STEP_JAB_HEAD").unwrap());
    let actions = jack.choose_actions_with(&combo, &state, Some(jill)).unwrap();
    let names: Vec<_> = actions.iter().map(|a| a.name()).collect();
    assert_eq!(names, vec!["step", "jab head"]);
    assert!(actions.iter().all(|a| (a.max_range() - 5.0).abs() < 1e-4));
}
