use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Fullscreen, Window, WindowId};

use crate::core::{App as CoreApp, AppControl, FrameCtx, WindowCtx};
use crate::device::{Gpu, GpuInit};
use crate::input::platform::winit::translate_window_event;
use crate::input::{InputEvent, InputFrame, InputState, Key, KeyState};
use crate::render::RenderCtx;
use crate::time::{FpsCounter, FrameClock};

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,

    /// Skip frames while the window is unfocused. Minimized windows never
    /// render, whatever this is set to.
    pub pause_when_inactive: bool,

    /// Open in borderless fullscreen.
    pub start_fullscreen: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "prism".to_string(),
            initial_size: LogicalSize::new(800.0, 600.0),
            pause_when_inactive: false,
            start_fullscreen: false,
        }
    }
}

/// Runtime context passed to the application.
///
/// Commands are buffered and applied after the current callback returns.
#[derive(Debug, Default)]
pub struct RuntimeCtx {
    commands: Vec<Command>,
}

impl RuntimeCtx {
    pub fn exit(&mut self) {
        self.commands.push(Command::Exit);
    }

    pub fn set_fullscreen(&mut self, fullscreen: bool) {
        self.commands.push(Command::SetFullscreen(fullscreen));
    }

    pub fn toggle_fullscreen(&mut self) {
        self.commands.push(Command::ToggleFullscreen);
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Command {
    Exit,
    SetFullscreen(bool),
    ToggleFullscreen,
}

/// Keys the runtime handles for every program: `Escape` exits, `F` toggles
/// fullscreen.
fn builtin_command(ev: &InputEvent) -> Option<Command> {
    match ev {
        InputEvent::Key {
            key,
            state: KeyState::Pressed,
            repeat: false,
        } => match key {
            Key::Escape => Some(Command::Exit),
            Key::Letter('F') => Some(Command::ToggleFullscreen),
            _ => None,
        },
        _ => None,
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the program window and drives `app` until exit.
    ///
    /// Errors raised while creating the window, the GPU context or the app's
    /// resources end the loop and are returned here.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: 'static + CoreApp,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, gpu_init, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.init_error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    input_state: InputState,
    input_frame: InputFrame,
    clock: FrameClock,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct AppState<A>
where
    A: CoreApp + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    entry: Option<WindowEntry>,
    focused: bool,
    fps: FpsCounter,

    init_error: Option<anyhow::Error>,
    exit_requested: bool,
}

impl<A> AppState<A>
where
    A: CoreApp + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self {
            config,
            gpu_init,
            app,
            entry: None,
            focused: true,
            fps: FpsCounter::default(),
            init_error: None,
            exit_requested: false,
        }
    }

    fn request_exit(&mut self, event_loop: &ActiveEventLoop) {
        if !self.exit_requested {
            log::info!("exit requested");
        }
        self.exit_requested = true;
        // Drops the GPU context before the window it borrows.
        self.entry = None;
        event_loop.exit();
    }

    fn create_window_entry(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let mut attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);
        if self.config.start_fullscreen {
            attrs = attrs.with_fullscreen(Some(Fullscreen::Borderless(None)));
        }

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = self.gpu_init.clone();

        let entry = WindowEntryTryBuilder {
            input_state: InputState::default(),
            input_frame: InputFrame::default(),
            clock: FrameClock::default(),
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()
        .context("GPU initialization failed")?;

        let app = &mut self.app;
        entry
            .with_gpu(|gpu| {
                let size = gpu.size();
                let rctx = RenderCtx::new(
                    gpu.device(),
                    gpu.queue(),
                    gpu.surface_format(),
                    gpu.depth_format(),
                    (size.width, size.height),
                );
                app.init(&rctx)?;
                app.on_resize(size.width, size.height);
                Ok::<_, anyhow::Error>(())
            })
            .context("application initialization failed")?;

        if self.config.start_fullscreen {
            entry.with_window(|w| w.set_cursor_visible(false));
        }

        self.entry = Some(entry);
        Ok(())
    }

    fn set_fullscreen(&mut self, fullscreen: bool) {
        let Some(entry) = self.entry.as_ref() else { return; };
        entry.with_window(|w| {
            w.set_fullscreen(fullscreen.then_some(Fullscreen::Borderless(None)));
            w.set_cursor_visible(!fullscreen);
        });
        log::info!("fullscreen: {fullscreen}");
    }

    fn is_fullscreen(&self) -> bool {
        self.entry
            .as_ref()
            .is_some_and(|e| e.with_window(|w| w.fullscreen().is_some()))
    }

    fn apply_commands(&mut self, event_loop: &ActiveEventLoop, ctx: RuntimeCtx) {
        for cmd in ctx.commands {
            match cmd {
                Command::Exit => self.request_exit(event_loop),
                Command::SetFullscreen(on) => self.set_fullscreen(on),
                Command::ToggleFullscreen => {
                    let on = !self.is_fullscreen();
                    self.set_fullscreen(on);
                }
            }
        }
    }

    fn paused(&self) -> bool {
        self.config.pause_when_inactive && !self.focused
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: CoreApp + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() || self.exit_requested {
            return;
        }

        if let Err(e) = self.create_window_entry(event_loop) {
            log::error!("initialization failed: {e:#}");
            self.init_error = Some(e);
            self.request_exit(event_loop);
            return;
        }

        if let Some(entry) = self.entry.as_ref() {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        // Render continuously while active; sleep on events while paused.
        if self.paused() {
            event_loop.set_control_flow(ControlFlow::Wait);
            return;
        }

        event_loop.set_control_flow(ControlFlow::Poll);
        if let Some(entry) = self.entry.as_ref() {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        let mut runtime_ctx = RuntimeCtx::default();
        let paused = self.paused();

        let Some(entry) = self.entry.as_mut() else {
            return;
        };

        if let Some(ev) = translate_window_event(&event) {
            if let Some(cmd) = builtin_command(&ev) {
                runtime_ctx.commands.push(cmd);
            }
            entry.with_mut(|fields| fields.input_state.apply_event(fields.input_frame, ev));
        }

        match &event {
            WindowEvent::CloseRequested => runtime_ctx.exit(),

            WindowEvent::Focused(focused) => {
                self.focused = *focused;
                if *focused {
                    // Paused time must not reach the next frame as one large step.
                    entry.with_clock_mut(|clock| clock.reset());
                }
                log::debug!("focus: {focused}");
            }

            WindowEvent::Resized(new_size) => {
                entry.with_gpu_mut(|gpu| gpu.resize(*new_size));
                self.app.on_resize(new_size.width, new_size.height);
                entry.with_window(|w| w.request_redraw());
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                let new_size = entry.with_window(|w| w.inner_size());
                entry.with_gpu_mut(|gpu| gpu.resize(new_size));
                self.app.on_resize(new_size.width, new_size.height);
                entry.with_window(|w| w.request_redraw());
            }

            WindowEvent::RedrawRequested if !paused => {
                let app = &mut self.app;
                let fps = &mut self.fps;
                let runtime = &mut runtime_ctx;

                let app_control = entry.with_mut(|fields| {
                    let time = fields.clock.tick();
                    if let Some(rate) = fps.record(time.dt) {
                        log::debug!("{rate:.1} fps");
                    }

                    app.on_input(fields.input_frame, fields.input_state, runtime);

                    // Scope to ensure `ctx` is dropped before mutating frame state.
                    let control = {
                        let mut ctx = FrameCtx {
                            window: WindowCtx {
                                id: window_id,
                                window: fields.window,
                            },
                            gpu: fields.gpu,
                            input: fields.input_state,
                            input_frame: fields.input_frame,
                            time,
                            runtime: &mut *runtime,
                        };
                        app.on_frame(&mut ctx)
                    };

                    // Clear per-frame deltas after the frame is consumed.
                    fields.input_frame.clear();
                    control
                });

                if app_control == AppControl::Exit {
                    runtime_ctx.exit();
                }
            }

            _ => {}
        }

        self.apply_commands(event_loop, runtime_ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(key: Key, state: KeyState, repeat: bool) -> InputEvent {
        InputEvent::Key { key, state, repeat }
    }

    // ── builtin keys ──────────────────────────────────────────────────────

    #[test]
    fn escape_press_exits() {
        assert_eq!(builtin_command(&key(Key::Escape, KeyState::Pressed, false)), Some(Command::Exit));
    }

    #[test]
    fn f_press_toggles_fullscreen() {
        assert_eq!(
            builtin_command(&key(Key::Letter('F'), KeyState::Pressed, false)),
            Some(Command::ToggleFullscreen)
        );
    }

    #[test]
    fn repeats_and_releases_are_ignored() {
        assert_eq!(builtin_command(&key(Key::Letter('F'), KeyState::Pressed, true)), None);
        assert_eq!(builtin_command(&key(Key::Escape, KeyState::Released, false)), None);
        assert_eq!(builtin_command(&InputEvent::Focused(true)), None);
    }

    #[test]
    fn other_keys_have_no_builtin() {
        assert_eq!(builtin_command(&key(Key::Digit(3), KeyState::Pressed, false)), None);
    }

    // ── config ────────────────────────────────────────────────────────────

    #[test]
    fn default_window_is_800_by_600() {
        let cfg = RuntimeConfig::default();
        assert_eq!(cfg.initial_size, LogicalSize::new(800.0, 600.0));
        assert!(!cfg.pause_when_inactive);
        assert!(!cfg.start_fullscreen);
    }

    #[test]
    fn runtime_ctx_buffers_commands_in_order() {
        let mut ctx = RuntimeCtx::default();
        ctx.toggle_fullscreen();
        ctx.set_fullscreen(false);
        ctx.exit();
        assert_eq!(
            ctx.commands,
            vec![Command::ToggleFullscreen, Command::SetFullscreen(false), Command::Exit]
        );
    }
}
