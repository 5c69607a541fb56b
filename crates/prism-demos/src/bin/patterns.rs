use anyhow::Result;

use prism_demos::patterns;
use prism_engine::core::{App, AppControl, FrameCtx};
use prism_engine::math::{AspectRatios, Projection};
use prism_engine::paint::Color;
use prism_engine::render::{Immediate, ImmediateRenderer};
use prism_engine::window::RuntimeConfig;

const PROJECTION: Projection = Projection::ortho_fit(patterns::HALF_EXTENT, -50.0, 50.0);

#[derive(Default)]
struct Patterns {
    imm: Immediate,
    renderer: ImmediateRenderer,
    ratios: AspectRatios,
}

impl App for Patterns {
    fn on_resize(&mut self, width: u32, height: u32) {
        self.imm.set_viewport(width, height);
        self.imm.set_projection(PROJECTION.matrix(width, height));
        self.ratios = AspectRatios::from_size(width, height);
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        patterns::record(&mut self.imm, self.ratios);
        let batch = self.imm.take_batch();

        let renderer = &mut self.renderer;
        ctx.render(Color::BLACK, |rctx, target| renderer.render(rctx, target, &batch))
    }
}

fn main() -> Result<()> {
    let config = RuntimeConfig {
        title: "Patterns".to_string(),
        ..RuntimeConfig::default()
    };
    prism_demos::run(config, Patterns::default())
}
