use anyhow::Result;

use prism_engine::core::{App, AppControl, FrameCtx};
use prism_engine::math::{mvp, Mat4, Projection, Vec3};
use prism_engine::paint::Color;
use prism_engine::render::{checkerboard, RenderCtx, Texture2d, TexturedQuad, TexturedQuadRenderer};
use prism_engine::window::RuntimeConfig;

const PROJECTION: Projection = Projection::perspective(60.0, 1.0, 30.0);

const TEXTURE_SIZE: u32 = 64;
const CELL_BIT: u32 = 8;

const SQUARES: [TexturedQuad; 2] = [
    // Facing the viewer.
    TexturedQuad::new([[0.0, 1.0, 0.0], [-2.0, 1.0, 0.0], [-2.0, -1.0, 0.0], [0.0, -1.0, 0.0]]),
    // Tilted 45 degrees away about its left edge.
    TexturedQuad::new([
        [2.41421, 1.0, -1.41421],
        [1.0, 1.0, 0.0],
        [1.0, -1.0, 0.0],
        [2.41421, -1.0, -1.41421],
    ]),
];

struct Scene {
    _texture: Texture2d,
    renderer: TexturedQuadRenderer,
}

struct Checkerboard {
    scene: Option<Scene>,
    model_view: Mat4,
    projection: Mat4,
}

impl App for Checkerboard {
    fn init(&mut self, ctx: &RenderCtx<'_>) -> Result<()> {
        let pixels = checkerboard(TEXTURE_SIZE, TEXTURE_SIZE, CELL_BIT);
        let texture = Texture2d::from_rgba8(ctx.device, ctx.queue, "checkerboard", TEXTURE_SIZE, TEXTURE_SIZE, &pixels)?;
        let renderer = TexturedQuadRenderer::new(ctx, &texture, &SQUARES);

        self.scene = Some(Scene {
            _texture: texture,
            renderer,
        });
        Ok(())
    }

    fn on_resize(&mut self, width: u32, height: u32) {
        self.projection = PROJECTION.matrix(width, height);
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let Some(scene) = self.scene.as_mut() else {
            return AppControl::Continue;
        };

        let matrix = mvp(self.projection, self.model_view);
        let renderer = &mut scene.renderer;
        ctx.render(Color::BLACK, |rctx, target| renderer.render(rctx, target, matrix))
    }
}

fn main() -> Result<()> {
    let config = RuntimeConfig {
        title: "Checkerboard Texture".to_string(),
        ..RuntimeConfig::default()
    };
    let app = Checkerboard {
        scene: None,
        model_view: Mat4::from_translation(Vec3::new(0.0, 0.0, -3.6)),
        projection: Mat4::IDENTITY,
    };
    prism_demos::run(config, app)
}
