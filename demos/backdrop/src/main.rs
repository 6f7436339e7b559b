use std::time::Duration;

use folio_ngin::{
    content::PageContent,
    flow::{self, FlowConstructor, RunConfig},
    page::{RevealPresets, compose, stack_bounds},
    reveal::{RevealController, ViewportGeometry},
    scene::{SceneConfig, backdrop},
};

const VIEWPORT: (f32, f32) = (1280.0, 720.0);
const FRAME: Duration = Duration::from_millis(16);

/// Scrolls the composed page top to bottom and logs every reveal as it fires.
fn simulate_scroll(content: &PageContent) {
    let mut plans = compose(content, &RevealPresets::default());
    stack_bounds(&mut plans, VIEWPORT.0, 160.0, 240.0);

    let mut controller = RevealController::new(ViewportGeometry::new(VIEWPORT.0, VIEWPORT.1));
    for plan in &plans {
        plan.register(&mut controller);
    }

    let bottom = plans
        .iter()
        .flat_map(|plan| plan.blocks.iter())
        .map(|planned| planned.block.bounds.bottom())
        .fold(0.0, f32::max);

    let mut now = Duration::ZERO;
    let mut scroll = 0.0;
    while controller.pending() > 0 && scroll <= bottom {
        for trigger in controller.check(now) {
            log::info!(
                "{:>7.3}s  scroll {:>6.0}px  {} (starts at {:.3}s)",
                now.as_secs_f32(),
                scroll,
                trigger.key,
                trigger.starts_at.as_secs_f32()
            );
        }
        scroll += 12.0;
        controller.source_mut().scroll_to(scroll);
        now += FRAME;
    }
    log::info!(
        "{} of {} blocks revealed after {:.1}s of scrolling",
        controller.len() - controller.pending(),
        controller.len(),
        now.as_secs_f32()
    );
}

fn main() -> anyhow::Result<()> {
    flow::init_logger();
    let content = PageContent::from_json(include_str!("../content.json"))?;
    simulate_scroll(&content);

    let constructors: Vec<FlowConstructor<()>> =
        vec![backdrop::constructor(SceneConfig::default())];
    flow::run_with(
        RunConfig {
            title: "backdrop".to_string(),
            ..Default::default()
        },
        constructors,
    )
}
