/// Terminal host for the ball viewer: event loop, loader wiring, status line
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, MouseButton,
        MouseEvent, MouseEventKind,
    },
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal,
};
use std::io::{self, stdout, Write};
use std::path::PathBuf;
use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};

use ballview_core::{Animation, Camera, LoadStatus, OrbitControls, Scene};

pub mod loader;
pub mod renderer;

pub use loader::LoadEvent;
pub use renderer::AsciiRenderer;

/// Viewer configuration from the command line
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    pub model_path: PathBuf,
    /// Recenter the loaded object at the origin by its bounding-box center
    pub recenter: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("models/ball/scene.gltf"),
            recenter: true,
        }
    }
}

/// Main application struct for the terminal viewer.
///
/// Owns all mutable state: the scene, camera, controls, renderer, and the
/// load status. One `tick` advances the animation and the damped controls
/// and draws exactly one frame.
pub struct ViewerApp {
    scene: Scene,
    camera: Camera,
    controls: OrbitControls,
    renderer: AsciiRenderer,
    animation: Animation,
    status: LoadStatus,
    load_events: Option<Receiver<LoadEvent>>,
    recenter: bool,
    dragging: Option<(u16, u16)>,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl ViewerApp {
    /// Bootstrap the scene against the current terminal size and kick off
    /// the asynchronous asset load.
    pub fn new(config: &ViewerConfig) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        let mut app = Self::with_size(width as u32, height as u32, config.recenter);
        app.load_events = Some(loader::spawn(config.model_path.clone()));
        Ok(app)
    }

    /// Construct without a terminal or loader, for direct driving
    pub fn with_size(width: u32, height: u32, recenter: bool) -> Self {
        Self {
            scene: Scene::new(),
            camera: Camera::new(width, height),
            controls: OrbitControls::new(),
            renderer: AsciiRenderer::new(width as usize, height as usize),
            animation: Animation::new(),
            status: LoadStatus::new(),
            load_events: None,
            recenter,
            dragging: None,
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        }
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            stdout(),
            terminal::EnterAlternateScreen,
            cursor::Hide,
            EnableMouseCapture
        )?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(
            stdout(),
            DisableMouseCapture,
            terminal::LeaveAlternateScreen,
            cursor::Show
        )?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_millis(1000 / 30); // 30 FPS target
        let mut out = stdout();

        while self.running {
            let frame_start = Instant::now();

            // Handle all pending input before drawing
            while event::poll(Duration::from_millis(0))? {
                self.handle_event(event::read()?);
            }

            self.tick(&mut out)?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    /// One frame tick: drain the loader, advance the animation and the
    /// damped controls, draw the frame. Runs whether or not the asset has
    /// arrived; an empty scene still renders.
    pub fn tick<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        self.drain_load_events();

        if let Some(object) = self.scene.object.as_mut() {
            self.animation.step(object);
        }
        self.controls.update(&mut self.camera);

        self.render(out)
    }

    fn drain_load_events(&mut self) {
        let Some(rx) = &self.load_events else {
            return;
        };
        let pending: Vec<LoadEvent> = rx.try_iter().collect();
        for event in pending {
            self.handle_load_event(event);
        }
    }

    fn handle_load_event(&mut self, event: LoadEvent) {
        match event {
            LoadEvent::Progress { loaded, total } => {
                self.status.progress(loaded, total);
            }
            LoadEvent::Loaded(mesh) => {
                tracing::info!(triangles = mesh.triangles.len(), "model loaded");
                let focus = self.scene.insert_object(mesh, self.recenter);
                self.controls.set_target(focus);
                self.controls.update(&mut self.camera);
                self.status.complete();
            }
            LoadEvent::Failed(reason) => {
                tracing::error!(%reason, "model load failed");
                self.status.fail();
            }
        }
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(KeyEvent { code, .. }) => self.handle_key(code),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize(width, height) => self.resize(width as u32, height as u32),
            _ => {}
        }
    }

    fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.running = false;
            }
            KeyCode::Left => self.controls.rotate(-0.1, 0.0),
            KeyCode::Right => self.controls.rotate(0.1, 0.0),
            KeyCode::Up => self.controls.rotate(0.0, 0.1),
            KeyCode::Down => self.controls.rotate(0.0, -0.1),
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.dragging = Some((mouse.column, mouse.row));
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if let Some((last_col, last_row)) = self.dragging {
                    let dx = mouse.column as f32 - last_col as f32;
                    let dy = mouse.row as f32 - last_row as f32;
                    // A drag across the full terminal is one revolution
                    let yaw = -dx / self.renderer.width().max(1) as f32 * std::f32::consts::TAU;
                    let pitch = -dy / self.renderer.height().max(1) as f32 * std::f32::consts::PI;
                    self.controls.rotate(yaw, pitch);
                }
                self.dragging = Some((mouse.column, mouse.row));
            }
            MouseEventKind::Up(_) => {
                self.dragging = None;
            }
            _ => {}
        }
    }

    /// Refit the camera and renderer to new terminal dimensions
    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera.set_viewport(width, height);
        self.renderer.resize(width as usize, height as usize);
    }

    fn render<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        self.renderer.clear();
        self.renderer.render_scene(&self.scene, &self.camera);

        queue!(out, cursor::MoveTo(0, 0))?;
        self.renderer.draw(out)?;

        // UI overlay
        queue!(
            out,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "Ballview | FPS: {:.1} | Drag/Arrows=Orbit Q=Quit",
                self.fps
            )),
            ResetColor
        )?;

        // Status line: load progress or the failure message
        if let Some(line) = self.status.status_line() {
            let row = self.renderer.height().saturating_sub(1) as u16;
            queue!(
                out,
                cursor::MoveTo(0, row),
                SetForegroundColor(Color::Yellow),
                Print(line),
                ResetColor
            )?;
        }

        out.flush()?;
        Ok(())
    }
}
