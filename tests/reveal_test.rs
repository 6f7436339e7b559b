use std::time::Duration;

use folio_ngin::reveal::{
    BlockKey, Bounds, Pose, RevealAnimation, RevealController, RevealOptions, RevealableBlock,
    StaggerGroup, Unsupported, ViewportGeometry, VisibilitySource, animation::ease_out_cubic,
};

const SECOND: Duration = Duration::from_secs(1);

fn fade_up() -> RevealAnimation {
    RevealAnimation::new(Pose::offset(0.0, 30.0), Duration::from_millis(800))
}

fn block(key: &str, y: f32) -> RevealableBlock {
    RevealableBlock::new(BlockKey::new(key), fade_up())
        .with_bounds(Bounds::new(0.0, y, 800.0, 100.0))
}

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

#[test]
fn should_trigger_once_when_scrolled_into_view() {
    let mut controller = RevealController::new(ViewportGeometry::new(800.0, 600.0));
    let handle = controller.register(block("projects/card/0", 1200.0), RevealOptions::default());

    assert!(controller.check(Duration::ZERO).is_empty());
    assert!(!controller.has_entered(handle));

    controller.source_mut().scroll_to(900.0);
    let triggers = controller.check(SECOND);
    assert_eq!(triggers.len(), 1);
    assert_eq!(triggers[0].handle, handle);
    assert_eq!(triggers[0].starts_at, SECOND);
    assert!(controller.has_entered(handle));

    // leaving and coming back never replays the animation
    controller.source_mut().scroll_to(0.0);
    assert!(controller.check(2 * SECOND).is_empty());
    controller.source_mut().scroll_to(900.0);
    assert!(controller.check(3 * SECOND).is_empty());
    assert!(controller.has_entered(handle));
    assert_eq!(controller.pending(), 0);
}

#[test]
fn should_stop_observing_after_the_first_trigger() {
    let mut controller = RevealController::new(ViewportGeometry::new(800.0, 600.0));
    controller.register(block("a", 100.0), RevealOptions::default());
    controller.register(block("b", 5000.0), RevealOptions::default());
    assert_eq!(controller.source().observed(), 2);

    controller.check(Duration::ZERO);
    assert_eq!(controller.source().observed(), 1);
}

#[test]
fn should_cascade_a_stagger_group_in_insertion_order() {
    let mut group = StaggerGroup::new("skills/card", Duration::from_millis(100));
    for i in 0..4 {
        group.push(BlockKey::indexed("skills", "card", i), fade_up());
    }
    let delays: Vec<_> = (0..4).map(|i| group.delay_for(i)).collect();

    let mut controller = RevealController::new(ViewportGeometry::new(800.0, 600.0));
    let handles: Vec<_> = group
        .into_blocks()
        .into_iter()
        .map(|b| {
            let b = b.with_bounds(Bounds::new(0.0, 0.0, 200.0, 100.0));
            controller.register(b, RevealOptions::default())
        })
        .collect();

    let now = Duration::from_millis(250);
    let triggers = controller.check(now);
    assert_eq!(triggers.len(), 4);
    for (i, trigger) in triggers.iter().enumerate() {
        assert_eq!(trigger.handle, handles[i]);
        assert_eq!(trigger.key, BlockKey::indexed("skills", "card", i));
        assert_eq!(trigger.starts_at, now + delays[i]);
    }
    assert!(triggers.windows(2).all(|w| w[0].starts_at < w[1].starts_at));
}

#[test]
fn should_offset_a_nested_group_by_its_base() {
    let mut group =
        StaggerGroup::new("chips", Duration::from_millis(50)).with_base(Duration::from_millis(300));
    assert_eq!(group.delay_for(0), Duration::from_millis(300));
    assert_eq!(group.delay_for(2), Duration::from_millis(400));

    let pushed = group.push(BlockKey::new("chip"), fade_up().with_delay(Duration::from_secs(9)));
    assert_eq!(pushed.animation.delay, Duration::from_millis(300));
    assert_eq!(group.len(), 1);
}

#[test]
fn should_shrink_the_viewport_with_a_negative_margin() {
    let mut controller = RevealController::new(ViewportGeometry::new(800.0, 600.0));
    // 30px of the block are inside the viewport
    let shrunk = controller.register(block("shrunk", 570.0), RevealOptions::margin(-50.0));
    let plain = controller.register(block("plain", 570.0), RevealOptions::margin(0.0));

    let triggers = controller.check(Duration::ZERO);
    assert_eq!(triggers.len(), 1);
    assert_eq!(triggers[0].handle, plain);
    assert!(!controller.has_entered(shrunk));

    controller.source_mut().scroll_by(100.0);
    let triggers = controller.check(SECOND);
    assert_eq!(triggers.len(), 1);
    assert_eq!(triggers[0].handle, shrunk);
}

#[test]
fn should_grow_the_viewport_with_a_positive_margin() {
    let mut controller = RevealController::new(ViewportGeometry::new(800.0, 600.0));
    let early = controller.register(block("early", 650.0), RevealOptions::margin(100.0));
    let late = controller.register(block("late", 650.0), RevealOptions::default());

    let triggers = controller.check(Duration::ZERO);
    assert_eq!(triggers.len(), 1);
    assert_eq!(triggers[0].handle, early);
    assert!(!controller.has_entered(late));
}

#[test]
fn should_show_every_block_when_visibility_is_unsupported() {
    let mut controller = RevealController::new(Unsupported);
    let handles: Vec<_> = (0..3)
        .map(|i| {
            let b = block(&format!("b/{i}"), 10_000.0 * i as f32);
            controller.register(b, RevealOptions::default())
        })
        .collect();

    let triggers = controller.check(Duration::ZERO);
    assert_eq!(triggers.len(), 3);
    assert!(handles.iter().all(|h| controller.has_entered(*h)));
    assert!(controller.is_settled(SECOND));
    for (_, pose) in controller.poses(SECOND) {
        assert_eq!(pose, Pose::SETTLED);
    }
}

#[test]
fn should_reveal_on_mount_without_observing() {
    let mut controller = RevealController::new(ViewportGeometry::new(800.0, 600.0));
    let handle = controller.register(block("hero/line/0", 99_999.0), RevealOptions::on_mount());
    assert_eq!(controller.source().observed(), 0);

    let triggers = controller.check(Duration::ZERO);
    assert_eq!(triggers.len(), 1);
    assert!(controller.has_entered(handle));
}

#[test]
fn should_hold_the_initial_pose_until_the_delay_elapsed() {
    let mut controller = RevealController::new(ViewportGeometry::new(800.0, 600.0));
    let delayed = RevealableBlock::new(
        BlockKey::new("delayed"),
        fade_up().with_delay(Duration::from_millis(500)),
    )
    .with_bounds(Bounds::new(0.0, 0.0, 100.0, 100.0));
    let handle = controller.register(delayed, RevealOptions::default());

    assert_eq!(controller.pose(handle, Duration::ZERO), Some(Pose::offset(0.0, 30.0)));
    controller.check(SECOND);
    let before = controller.pose(handle, SECOND + Duration::from_millis(499));
    assert_eq!(before, Some(Pose::offset(0.0, 30.0)));

    // halfway through the 800ms animation
    let halfway = controller
        .pose(handle, SECOND + Duration::from_millis(900))
        .unwrap();
    let eased = ease_out_cubic(0.5);
    assert!(close(halfway.opacity, eased));
    assert!(close(halfway.y, 30.0 * (1.0 - eased)));

    assert!(!controller.is_settled(SECOND + Duration::from_millis(1000)));
    assert!(controller.is_settled(SECOND + Duration::from_millis(1300)));
    assert_eq!(
        controller.pose(handle, SECOND + Duration::from_millis(1300)),
        Some(Pose::SETTLED)
    );
}

#[test]
fn should_ease_out_cubically() {
    assert_eq!(ease_out_cubic(0.0), 0.0);
    assert_eq!(ease_out_cubic(1.0), 1.0);
    assert!(close(ease_out_cubic(0.5), 0.875));
    assert_eq!(ease_out_cubic(2.0), 1.0);
    assert!(ease_out_cubic(0.25) > 0.25);
}

#[test]
fn should_forget_unregistered_blocks() {
    let mut controller = RevealController::new(ViewportGeometry::new(800.0, 600.0));
    let handle = controller.register(block("gone", 5000.0), RevealOptions::default());
    let kept = controller.register(block("kept", 5000.0), RevealOptions::default());

    let removed = controller.unregister(handle).map(|b| b.key().clone());
    assert_eq!(removed, Some(BlockKey::new("gone")));
    assert!(controller.unregister(handle).is_none());
    assert_eq!(controller.source().observed(), 1);
    assert_eq!(controller.len(), 1);

    controller.clear();
    assert!(controller.is_empty());
    assert_eq!(controller.source().observed(), 0);
    assert!(controller.pose(kept, Duration::ZERO).is_none());
}

#[test]
fn should_render_css_transforms() {
    let pose = Pose::offset(-50.0, 0.0).with_scale(0.95);
    assert_eq!(pose.css_transform(), "translate(-50.00px, 0.00px) scale(0.9500)");
    assert_eq!(Pose::default(), Pose::SETTLED);
}

#[test]
fn should_keep_a_remounted_block_observed_when_the_old_registration_goes() {
    let mut controller = RevealController::new(ViewportGeometry::new(800.0, 600.0));
    let old = controller.register(block("projects/card/0", 1200.0), RevealOptions::default());
    let remounted =
        controller.register(block("projects/card/0", 1200.0), RevealOptions::default());
    assert_eq!(controller.source().observed(), 1);

    controller.unregister(old);
    assert_eq!(controller.source().observed(), 1);

    controller.source_mut().scroll_to(900.0);
    let triggers = controller.check(SECOND);
    assert_eq!(triggers.len(), 1);
    assert_eq!(triggers[0].handle, remounted);
    assert!(controller.has_entered(remounted));
    assert_eq!(controller.source().observed(), 0);
}

#[test]
fn should_trigger_every_live_registration_of_a_shared_key() {
    let mut controller = RevealController::new(ViewportGeometry::new(800.0, 600.0));
    let first = controller.register(block("contact/link/0", 1200.0), RevealOptions::default());
    let second = controller.register(block("contact/link/0", 1200.0), RevealOptions::default());

    controller.source_mut().scroll_to(900.0);
    let handles: Vec<_> = controller.check(SECOND).iter().map(|t| t.handle).collect();
    assert_eq!(handles, vec![first, second]);
    assert_eq!(controller.source().observed(), 0);
    assert!(controller.check(2 * SECOND).is_empty());
}

#[test]
fn should_show_a_block_that_entered_before_in_its_final_state() {
    let mut controller = RevealController::new(ViewportGeometry::new(800.0, 600.0));
    let handle = controller.register(block("skills/header/0", 0.0), RevealOptions::default());
    assert_eq!(controller.check(Duration::ZERO).len(), 1);
    let entered = controller.unregister(handle).expect("registered");
    assert!(entered.has_entered());

    let again = controller.register(entered, RevealOptions::default());
    assert_eq!(controller.source().observed(), 0);
    assert!(controller.check(SECOND).is_empty());
    assert_eq!(controller.pose(again, SECOND), Some(Pose::SETTLED));
    assert!(controller.is_settled(SECOND));
    assert_eq!(controller.pending(), 0);
}

#[test]
fn should_never_trigger_an_unregistered_block() {
    let mut controller = RevealController::new(ViewportGeometry::new(800.0, 600.0));
    let gone = controller.register(block("projects/card/0", 1200.0), RevealOptions::default());
    let kept = controller.register(block("projects/card/1", 1200.0), RevealOptions::default());
    controller.unregister(gone);

    controller.source_mut().scroll_to(900.0);
    let triggers = controller.check(SECOND);
    assert_eq!(triggers.len(), 1);
    assert_eq!(triggers[0].handle, kept);
    assert!(!controller.has_entered(gone));
    assert!(controller.pose(gone, SECOND).is_none());
}

#[test]
fn should_latch_followers_in_the_same_cycle_as_their_leader() {
    let mut controller = RevealController::new(ViewportGeometry::new(800.0, 600.0));
    let card = controller.register(block("skills/card/1", 1200.0), RevealOptions::margin(-50.0));
    let chip_delay = Duration::from_millis(150);
    // far below the viewport: its own position never matters
    let chip = RevealableBlock::new(
        BlockKey::new("skills/card/1/chip/0"),
        fade_up().with_delay(chip_delay),
    )
    .with_bounds(Bounds::new(0.0, 5000.0, 100.0, 20.0));
    let chip = controller.register(chip, RevealOptions::following(card));
    assert_eq!(controller.source().observed(), 1);
    assert!(controller.check(Duration::ZERO).is_empty());

    controller.source_mut().scroll_to(900.0);
    let triggers = controller.check(SECOND);
    let handles: Vec<_> = triggers.iter().map(|t| t.handle).collect();
    assert_eq!(handles, vec![card, chip]);
    assert_eq!(triggers[0].starts_at, SECOND);
    assert_eq!(triggers[1].starts_at, SECOND + chip_delay);
}

#[test]
fn should_release_followers_of_a_removed_leader() {
    let mut controller = RevealController::new(ViewportGeometry::new(800.0, 600.0));
    let leader = controller.register(block("education/column/0", 5000.0), RevealOptions::default());
    let follower = controller.register(
        block("education/degree/0", 5000.0),
        RevealOptions::following(leader),
    );
    assert!(controller.check(Duration::ZERO).is_empty());

    controller.unregister(leader);
    let triggers = controller.check(SECOND);
    assert_eq!(triggers.len(), 1);
    assert_eq!(triggers[0].handle, follower);
}

#[test]
fn should_see_an_empty_block_inside_the_viewport() {
    let mut controller = RevealController::new(ViewportGeometry::new(800.0, 600.0));
    let inside = controller.register(
        RevealableBlock::new(BlockKey::new("unlaid"), fade_up()),
        RevealOptions::default(),
    );
    controller.register(
        RevealableBlock::new(BlockKey::new("below"), fade_up())
            .with_bounds(Bounds::new(0.0, 900.0, 0.0, 0.0)),
        RevealOptions::default(),
    );

    let triggers = controller.check(Duration::ZERO);
    assert_eq!(triggers.len(), 1);
    assert_eq!(triggers[0].handle, inside);

    // rectangles with area still need a real overlap
    let viewport = Bounds::new(0.0, 0.0, 100.0, 100.0);
    assert!(Bounds::new(10.0, 10.0, 0.0, 0.0).intersects(&viewport));
    assert!(!Bounds::new(0.0, 100.0, 100.0, 100.0).intersects(&viewport));
}

#[test]
fn should_append_a_tilt_to_css_transforms() {
    let pose = Pose::offset(0.0, 40.0).with_tilt(10.0);
    assert_eq!(
        pose.css_transform(),
        "translate(0.00px, 40.00px) scale(1.0000) rotateX(10.00deg)"
    );
    let halfway = pose.lerp(&Pose::SETTLED, 0.5);
    assert!(close(halfway.rotate_x, 5.0));
}
