use anyhow::Result;

use prism_demos::shapes::{record_cube, record_pyramid};
use prism_demos::speed::{Rotation, SpeedControl};
use prism_engine::core::{App, AppControl, FrameCtx};
use prism_engine::input::{InputFrame, InputState};
use prism_engine::math::Projection;
use prism_engine::paint::Color;
use prism_engine::render::{Immediate, ImmediateRenderer};
use prism_engine::window::{RuntimeConfig, RuntimeCtx};

const PROJECTION: Projection = Projection::perspective(45.0, 1.0, 100.0);

#[derive(Default)]
struct PyramidCube {
    imm: Immediate,
    renderer: ImmediateRenderer,
    speed: SpeedControl,
    rotation: Rotation,
}

impl PyramidCube {
    fn record(&mut self) {
        let imm = &mut self.imm;

        imm.load_identity();
        imm.translate(-1.5, 0.0, -7.0);
        imm.rotate(self.rotation.pyramid.degrees(), 0.0, 1.0, 0.0);
        record_pyramid(imm);

        imm.load_identity();
        imm.translate(1.5, 0.0, -7.0);
        imm.scale(0.75, 0.75, 0.75);
        imm.rotate(self.rotation.cube.degrees(), 1.0, 1.0, 1.0);
        record_cube(imm);
    }
}

impl App for PyramidCube {
    fn on_resize(&mut self, width: u32, height: u32) {
        self.imm.set_viewport(width, height);
        self.imm.set_projection(PROJECTION.matrix(width, height));
    }

    fn on_input(&mut self, frame: &InputFrame, _state: &InputState, _runtime: &mut RuntimeCtx) {
        self.speed.handle_input(frame);
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        self.record();
        let batch = self.imm.take_batch();

        let renderer = &mut self.renderer;
        let control = ctx.render(Color::BLACK, |rctx, target| renderer.render(rctx, target, &batch));

        self.rotation.advance_if_drawn(self.speed.degrees_per_frame(), ctx.window.physical_size());
        control
    }
}

fn main() -> Result<()> {
    let config = RuntimeConfig {
        title: "Pyramid and Cube Rotation".to_string(),
        ..RuntimeConfig::default()
    };
    prism_demos::run(config, PyramidCube::default())
}
