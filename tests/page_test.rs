use std::time::Duration;

use folio_ngin::{
    content::PageContent,
    error::ContentError,
    page::{RevealPresets, SectionKind, SectionPlan, compose, stack_bounds},
    reveal::{BlockKey, RevealController, ViewportGeometry, VisibilitySource},
};

const CONTENT: &str = r#"{
    "hero": { "name": "Jordan Example", "headline": "Engineer", "tagline": "Builds things" },
    "experience": [
        { "company": "Example Corp", "roles": [{ "title": "Engineer", "period": "2020 - now" }] },
        { "company": "Sample Labs" },
        { "company": "Placeholder GmbH" }
    ],
    "skills": [
        { "title": "Languages", "skills": ["Rust", "TypeScript", "Python"] },
        { "title": "Cloud", "skills": ["Containers", "Queues"] }
    ],
    "projects": [{ "title": "One" }, { "title": "Two" }],
    "education": [{ "school": "Example University" }],
    "certifications": [{ "title": "Cert" }, { "title": "Another cert" }],
    "awards": ["Award"],
    "contact": [
        { "label": "Email", "value": "hello@example.com", "href": "mailto:hello@example.com" },
        { "label": "Location", "value": "Somewhere" }
    ],
    "footer": { "lines": ["Built with care"] }
}"#;

fn plans() -> Vec<SectionPlan> {
    let content = PageContent::from_json(CONTENT).expect("valid content");
    compose(&content, &RevealPresets::default())
}

fn section(plans: &[SectionPlan], kind: SectionKind) -> &SectionPlan {
    plans.iter().find(|p| p.kind == kind).expect("section present")
}

#[test]
fn should_compose_every_section_in_page_order() {
    let plans = plans();
    let kinds: Vec<_> = plans.iter().map(|p| p.kind).collect();
    assert_eq!(kinds, SectionKind::ALL.to_vec());

    for plan in &plans {
        for key in plan.keys() {
            assert!(key.as_str().starts_with(plan.kind.id()), "{key} outside {:?}", plan.kind);
        }
    }
}

#[test]
fn should_reveal_hero_lines_on_mount_with_their_delays() {
    let plans = plans();
    let presets = RevealPresets::default();
    let hero = section(&plans, SectionKind::Hero);
    assert_eq!(hero.blocks.len(), presets.hero_lines.len());
    for (planned, (initial, delay)) in hero.blocks.iter().zip(&presets.hero_lines) {
        assert!(!planned.options.observe);
        assert_eq!(planned.block.animation.initial, *initial);
        assert_eq!(planned.block.animation.delay, *delay);
    }

    let mut controller = RevealController::new(ViewportGeometry::new(1280.0, 720.0));
    hero.register(&mut controller);
    assert_eq!(controller.source().observed(), 0);
    assert_eq!(controller.check(Duration::ZERO).len(), hero.blocks.len());
}

#[test]
fn should_slide_experience_cards_from_alternating_sides() {
    let plans = plans();
    let presets = RevealPresets::default();
    let experience = section(&plans, SectionKind::Experience);
    let cards: Vec<_> = experience
        .blocks
        .iter()
        .filter(|p| p.block.key().as_str().contains("/card/"))
        .collect();
    assert_eq!(cards.len(), 3);
    for (i, card) in cards.iter().enumerate() {
        let expected_x = if i % 2 == 0 { -50.0 } else { 50.0 };
        assert_eq!(card.block.animation.initial.x, expected_x);
        assert_eq!(card.block.animation.delay, presets.experience.stagger * i as u32);
        assert_eq!(card.options.margin_px, -100.0);
        assert!(card.options.trigger_once);
    }
}

#[test]
fn should_cascade_skill_chips_after_their_card() {
    let plans = plans();
    let presets = RevealPresets::default();
    let skills = section(&plans, SectionKind::Skills);
    let keys: Vec<_> = skills.keys().map(BlockKey::as_str).collect();
    let first_chip = keys.iter().position(|k| k.contains("/chip/")).expect("chips");
    let last_card = keys.iter().rposition(|k| k.ends_with("card/1")).expect("cards");
    assert!(last_card < first_chip, "cards register before chips: {keys:?}");

    let card = skills
        .blocks
        .iter()
        .find(|p| p.block.key() == &BlockKey::indexed("skills", "card", 1))
        .expect("second card");
    let card_delay = card.block.animation.delay;
    for chip in 0..2 {
        let key = BlockKey::indexed("skills", "card", 1).child("chip", chip);
        let planned = skills
            .blocks
            .iter()
            .find(|p| p.block.key() == &key)
            .expect("chip");
        assert_eq!(
            planned.block.animation.delay,
            card_delay + presets.skill_chip.stagger * chip as u32
        );
    }
}

#[test]
fn should_latch_nested_blocks_with_their_container() {
    let plans = plans();
    let mut skills = section(&plans, SectionKind::Skills).clone();
    for planned in &skills.blocks {
        if planned.block.key().as_str().contains("/chip/") {
            let leader = planned.follows.expect("chips follow their card");
            let card = skills.blocks[leader].block.key().as_str();
            assert!(planned.block.key().as_str().starts_with(card));
        }
    }
    let education = section(&plans, SectionKind::Education);
    let degree = education
        .blocks
        .iter()
        .find(|p| p.block.key() == &BlockKey::indexed("education", "degree", 0))
        .expect("degree");
    let column = degree.follows.expect("degrees follow their column");
    assert_eq!(education.blocks[column].block.key(), &BlockKey::indexed("education", "column", 0));

    // header and cards fit in the viewport, the chips lie below it
    stack_bounds(std::slice::from_mut(&mut skills), 1280.0, 120.0, 0.0);
    let mut controller = RevealController::new(ViewportGeometry::new(1280.0, 400.0));
    skills.register(&mut controller);
    assert_eq!(controller.source().observed(), 3);

    let now = Duration::from_secs(2);
    let triggers = controller.check(now);
    assert_eq!(triggers.len(), skills.blocks.len());
    for (trigger, planned) in triggers.iter().zip(&skills.blocks) {
        assert_eq!(trigger.key, *planned.block.key());
        assert_eq!(trigger.starts_at, now + planned.block.animation.delay);
    }
}

#[test]
fn should_always_plan_a_footer_line() {
    let plans = compose(&PageContent::default(), &RevealPresets::default());
    let footer = section(&plans, SectionKind::Footer);
    assert_eq!(footer.blocks.len(), 1);
    assert!(section(&plans, SectionKind::Projects).blocks.len() == 1, "header only");
}

#[test]
fn should_trigger_every_block_exactly_once_while_scrolling_down_and_up() {
    let mut plans = plans();
    stack_bounds(&mut plans, 1280.0, 120.0, 200.0);
    let total: usize = plans.iter().map(|p| p.blocks.len()).sum();
    let page_height = plans
        .iter()
        .flat_map(|p| p.blocks.iter())
        .map(|p| p.block.bounds.bottom())
        .fold(0.0, f32::max);

    let mut controller = RevealController::new(ViewportGeometry::new(1280.0, 720.0));
    for plan in &plans {
        plan.register(&mut controller);
    }

    let mut triggered = Vec::new();
    let mut now = Duration::ZERO;
    let mut scroll = 0.0;
    let step = 90.0;
    while scroll < page_height {
        triggered.extend(controller.check(now));
        scroll += step;
        controller.source_mut().scroll_to(scroll);
        now += Duration::from_millis(16);
    }
    while scroll > 0.0 {
        triggered.extend(controller.check(now));
        scroll -= step;
        controller.source_mut().scroll_to(scroll);
        now += Duration::from_millis(16);
    }

    assert_eq!(triggered.len(), total);
    let mut keys: Vec<_> = triggered.iter().map(|t| t.key.clone()).collect();
    keys.sort();
    keys.dedup();
    assert_eq!(keys.len(), total);
    assert_eq!(controller.pending(), 0);
    assert_eq!(controller.source().observed(), 0);
}

#[test]
fn should_default_missing_content_fields() {
    let content = PageContent::from_json(r#"{ "hero": { "name": "Sam Placeholder" } }"#)
        .expect("partial content");
    assert_eq!(content.hero.name, "Sam Placeholder");
    assert!(content.experience.is_empty());
    assert!(content.hero.resume_href.is_none());
}

#[test]
fn should_reject_malformed_content() {
    let err = PageContent::from_json("{ not json").unwrap_err();
    assert!(matches!(err, ContentError::Json(_)));
}
