//! Dormtour - desktop preview
//!
//! Opens a window and runs the tour against keyboard and mouse input. The
//! window title shows where the tourist is and which door is highlighted.

use std::path::PathBuf;
use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{DeviceEvent, DeviceId, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{CursorGrabMode, Window, WindowId},
};

use dormtour::config::TourConfig;
use dormtour::core::{input::InputState, logging, time::FrameTimer};
use dormtour::scene::SceneDescription;
use dormtour::tour::{DesktopTracking, SimulatedHeadset, Tour, Tracking};

/// Command line options
struct Args {
    scene: PathBuf,
    config: Option<PathBuf>,
    vr: bool,
}

struct App<T: Tracking> {
    window: Option<Arc<Window>>,
    tour: Tour<T>,
    input: InputState,
    timer: FrameTimer,
    cursor_grabbed: bool,
}

impl<T: Tracking> App<T> {
    fn new(tour: Tour<T>) -> Self {
        Self {
            window: None,
            tour,
            input: InputState::new(),
            timer: FrameTimer::new(),
            cursor_grabbed: false,
        }
    }

    fn toggle_cursor_grab(&mut self) {
        if let Some(window) = &self.window {
            self.cursor_grabbed = !self.cursor_grabbed;

            if self.cursor_grabbed {
                window
                    .set_cursor_grab(CursorGrabMode::Confined)
                    .or_else(|_| window.set_cursor_grab(CursorGrabMode::Locked))
                    .ok();
                window.set_cursor_visible(false);
            } else {
                window.set_cursor_grab(CursorGrabMode::None).ok();
                window.set_cursor_visible(true);
            }
        }
    }

    fn frame(&mut self) {
        self.timer.tick();
        let outcome = self.tour.update(self.timer.delta_secs(), &self.input);
        if let Some(event) = outcome.transported {
            log::info!("Now in '{}'", self.tour.scene().name(event.to));
        }

        if let Some(window) = &self.window {
            window.set_title(&format!(
                "Dormtour - {} | door: {} | {:.0} FPS | Tab=mouse, WASD=move, Q/E=turn, LMB=point, RMB=select",
                self.tour.current_room_name().unwrap_or("-"),
                self.tour.highlighted_door_name().unwrap_or("-"),
                self.timer.fps()
            ));
        }

        self.input.end_frame();
    }
}

impl<T: Tracking> ApplicationHandler for App<T> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = Window::default_attributes()
            .with_title("Dormtour")
            .with_inner_size(PhysicalSize::new(960, 540));

        match event_loop.create_window(window_attrs) {
            Ok(window) => {
                let size = window.inner_size();
                log::info!("Window created: {}x{}", size.width, size.height);
                self.window = Some(Arc::new(window));
            }
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        self.input.process_event(&event);

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::KeyboardInput { event: key_event, .. } => {
                if key_event.state.is_pressed() && !key_event.repeat {
                    match key_event.physical_key {
                        PhysicalKey::Code(KeyCode::Escape) => event_loop.exit(),
                        PhysicalKey::Code(KeyCode::Tab) => self.toggle_cursor_grab(),
                        _ => {}
                    }
                }
            }
            WindowEvent::RedrawRequested => {
                self.frame();
            }
            _ => {}
        }
    }

    fn device_event(&mut self, _event_loop: &ActiveEventLoop, _device_id: DeviceId, event: DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta } = event {
            if self.cursor_grabbed {
                self.input.process_mouse_motion(delta);
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() {
    logging::init();
    log::info!("Dormtour starting...");

    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();
    let args = parse_args(&args)?;

    log::info!("Loading scene from: {}", args.scene.display());
    let scene = SceneDescription::load(&args.scene)?.build()?;
    let config = match &args.config {
        Some(path) => {
            log::info!("Loading config from: {}", path.display());
            TourConfig::load(path)?
        }
        None => TourConfig::default(),
    };

    let event_loop = EventLoop::new()?;
    if args.vr {
        log::info!("Using simulated headset");
        let mut app = App::new(Tour::new(scene, config, SimulatedHeadset::new())?);
        event_loop.run_app(&mut app)?;
    } else {
        let mut app = App::new(Tour::new(scene, config, DesktopTracking::new())?);
        event_loop.run_app(&mut app)?;
    }
    Ok(())
}

fn parse_args(args: &[String]) -> Result<Args, String> {
    let scene = parse_path_arg(args, "--scene", "-s")
        .ok_or("usage: dormtour --scene <PATH> [--config <PATH>] [--vr]")?;
    Ok(Args {
        scene,
        config: parse_path_arg(args, "--config", "-c"),
        vr: args.iter().any(|a| a == "--vr"),
    })
}

/// Value following `long` or `short` on the command line
fn parse_path_arg(args: &[String], long: &str, short: &str) -> Option<PathBuf> {
    for i in 0..args.len() {
        if args[i] == long || args[i] == short {
            if let Some(value) = args.get(i + 1) {
                return Some(PathBuf::from(value));
            }
        }
    }
    None
}
