use anyhow::Result;

use prism_demos::shapes::{cube_model_view, cube_triangles, pyramid_model_view, PYRAMID_COLORS, PYRAMID_POSITIONS};
use prism_demos::speed::{Rotation, SpeedControl};
use prism_engine::core::{App, AppControl, FrameCtx};
use prism_engine::input::{InputFrame, InputState};
use prism_engine::math::{mvp, Mat4, Projection};
use prism_engine::paint::Color;
use prism_engine::render::{ColoredMesh, ColoredMeshRenderer, RenderCtx};
use prism_engine::window::{RuntimeConfig, RuntimeCtx};

const PROJECTION: Projection = Projection::perspective(45.0, 0.1, 100.0);

struct Scene {
    pyramid: ColoredMesh,
    cube: ColoredMesh,
    renderer: ColoredMeshRenderer,
}

struct PyramidCubeBuffers {
    scene: Option<Scene>,
    projection: Mat4,
    speed: SpeedControl,
    rotation: Rotation,
}

impl App for PyramidCubeBuffers {
    fn init(&mut self, ctx: &RenderCtx<'_>) -> Result<()> {
        let pyramid = ColoredMesh::upload(ctx.device, "pyramid", &PYRAMID_POSITIONS, &PYRAMID_COLORS)?;

        let (cube_positions, cube_colors) = cube_triangles();
        let cube = ColoredMesh::upload(ctx.device, "cube", &cube_positions, &cube_colors)?;

        self.scene = Some(Scene {
            pyramid,
            cube,
            renderer: ColoredMeshRenderer::new(ctx),
        });
        Ok(())
    }

    fn on_resize(&mut self, width: u32, height: u32) {
        self.projection = PROJECTION.matrix(width, height);
    }

    fn on_input(&mut self, frame: &InputFrame, _state: &InputState, _runtime: &mut RuntimeCtx) {
        self.speed.handle_input(frame);
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let Some(scene) = self.scene.as_mut() else {
            return AppControl::Continue;
        };

        let draws = [
            (&scene.pyramid, mvp(self.projection, pyramid_model_view(self.rotation.pyramid.degrees()))),
            (&scene.cube, mvp(self.projection, cube_model_view(self.rotation.cube.degrees()))),
        ];

        let renderer = &mut scene.renderer;
        let control = ctx.render(Color::BLACK, |rctx, target| renderer.render(rctx, target, &draws));

        self.rotation.advance_if_drawn(self.speed.degrees_per_frame(), ctx.window.physical_size());
        control
    }
}

fn main() -> Result<()> {
    let config = RuntimeConfig {
        title: "Pyramid and Cube Rotation (buffers)".to_string(),
        ..RuntimeConfig::default()
    };
    let app = PyramidCubeBuffers {
        scene: None,
        projection: Mat4::IDENTITY,
        speed: SpeedControl::default(),
        rotation: Rotation::default(),
    };
    prism_demos::run(config, app)
}
