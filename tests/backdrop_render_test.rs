#[cfg(feature = "integration-tests")]
#[macro_use]
mod common;

#[test]
#[cfg(feature = "integration-tests")]
fn should_draw_the_backdrop_over_the_clear_colour() {
    use crate::common::test_utils::{TestRender, to_pixel};
    use folio_ngin::{
        flow::ImageTestResult,
        scene::{Backdrop, ProceduralSceneAnimator, SceneConfig},
    };
    use rand::{SeedableRng, rngs::StdRng};

    golden_image_test!(|ctx| {
        let config = SceneConfig::default();
        let clear = to_pixel(config.clear_colour);
        let animator = ProceduralSceneAnimator::mount(&config, &mut StdRng::seed_from_u64(7));
        TestRender::new(
            Backdrop::with_animator(ctx, config, animator),
            |_| {},
            move |_, state: &mut FrameCounter, texture| {
                if state.frame() < 3 {
                    return Ok(ImageTestResult::Waiting);
                }
                let drawn = texture.pixels().filter(|pixel| **pixel != clear).count();
                assert!(drawn > 0, "the backdrop left every pixel at the clear colour");
                Ok(ImageTestResult::Passed)
            },
        )
    });
}
