#[cfg(feature = "integration-tests")]
mod common;

#[cfg(feature = "integration-tests")]
mod lifecycle {
    use folio_ngin::{
        context::Context,
        flow::{FrameClock, GraphicsFlow, ImageTestResult, Out},
        render::Render,
    };
    use wgpu::Color;

    use crate::common::test_utils::State;

    pub(crate) struct GraphicsElement {
        last_elapsed: std::time::Duration,
    }

    impl GraphicsElement {
        pub(crate) fn new() -> Self {
            Self {
                last_elapsed: std::time::Duration::ZERO,
            }
        }
    }

    impl GraphicsFlow<State> for GraphicsElement {
        fn on_init(&mut self, ctx: &mut Context, state: &mut State) -> Out<State> {
            ctx.clear_colour = Color::TRANSPARENT;
            assert_eq!(state.frame_counter(), 0);
            assert_eq!(state.init_invocations(), 0);
            assert_eq!(state.update_invocations(), 0);

            state.init();
            Out::Empty
        }

        fn on_update(&mut self, _: &Context, state: &mut State, clock: &FrameClock) -> Out<State> {
            assert_eq!(state.frame_counter(), state.update_invocations());
            assert_eq!(state.init_invocations(), 1);
            assert!(clock.elapsed() > self.last_elapsed, "the clock must advance every frame");
            self.last_elapsed = clock.elapsed();
            state.frame();
            state.update();

            match state.frame_counter() {
                3 => Out::Configure(Box::new(|ctx: &mut Context, state: &mut State| {
                    ctx.clear_colour = Color::WHITE;
                    state.dummy_state.push('🍵');
                })),
                x if x > 3 => {
                    // emojis are 4 bytes wide.
                    assert_eq!(state.dummy_state.len(), 4, "{}", state.dummy_state);
                    Out::Empty
                }
                _ => Out::Empty,
            }
        }

        fn on_render(&self) -> Render<'_> {
            Render::None
        }

        fn on_unmount(&mut self, _: &Context, state: &mut State) {
            state.unmount();
            assert_eq!(state.unmount_invocations(), 1);
        }

        fn render_to_texture(
            &self,
            _: &Context,
            state: &mut State,
            _: &mut image::ImageBuffer<image::Rgba<u8>, wgpu::BufferView>,
        ) -> Result<ImageTestResult, anyhow::Error> {
            if state.frame_counter() > 5 {
                Ok(ImageTestResult::Passed)
            } else {
                Ok(ImageTestResult::Waiting)
            }
        }
    }
}

#[test]
#[cfg(feature = "integration-tests")]
fn should_run_every_hook_in_order() {
    use folio_ngin::flow::{FlowConstructor, GraphicsFlow};

    use crate::common::test_utils::State;

    let model_constructor: FlowConstructor<State> = Box::new(|_| {
        Box::pin(async move {
            Box::new(lifecycle::GraphicsElement::new()) as Box<dyn GraphicsFlow<_>>
        })
    });

    if let Err(e) = folio_ngin::flow::run(vec![model_constructor]) {
        panic!("{}", e);
    }
}
