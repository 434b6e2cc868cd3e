/// Terminal front end: input, frame loop and ASCII presentation
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use sl3d_core::{Action, Compositor, RenderMode, RenderState};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};

pub mod fps;
pub mod logging;
pub mod renderer;

pub use fps::FpsCounter;
pub use renderer::AsciiRenderer;

/// Rows reserved for the status line
const STATUS_ROWS: u16 = 1;

/// Map a key to its viewer action
pub fn action_for_key(code: KeyCode) -> Option<Action> {
    let action = match code {
        KeyCode::Right => Action::RotateYNeg,
        KeyCode::Left => Action::RotateYPos,
        KeyCode::Up => Action::RotateXPos,
        KeyCode::Down => Action::RotateXNeg,
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'a' => Action::TranslateXNeg,
            'd' => Action::TranslateXPos,
            'w' => Action::TranslateYPos,
            's' => Action::TranslateYNeg,
            'z' => Action::TranslateZPos,
            'x' => Action::TranslateZNeg,
            't' => Action::ToggleWireframe,
            _ => return None,
        },
        _ => return None,
    };
    Some(action)
}

/// Main application struct for terminal rendering
pub struct TerminalApp {
    state: RenderState,
    compositor: Compositor,
    renderer: AsciiRenderer,
    running: bool,
    fps: FpsCounter,
    target_frame_time: Duration,
}

impl TerminalApp {
    pub fn new(state: RenderState, compositor: Compositor, target_fps: u32) -> io::Result<Self> {
        let (width, height) = terminal::size()?;

        Ok(Self {
            state,
            compositor,
            renderer: AsciiRenderer::new(
                width as usize,
                height.saturating_sub(STATUS_ROWS) as usize,
            ),
            running: true,
            fps: FpsCounter::new(Instant::now()),
            target_frame_time: Duration::from_secs(1) / target_fps.max(1),
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        while self.running {
            let frame_start = Instant::now();

            // Drain input so every key press lands before this frame is drawn
            while event::poll(Duration::from_millis(0))? {
                let event = event::read()?;
                self.handle_event(event);
            }

            self.render()?;

            if let Some(fps) = self.fps.tick(Instant::now()) {
                log::debug!("fps: {}", fps);
            }

            let elapsed = frame_start.elapsed();
            if elapsed < self.target_frame_time {
                std::thread::sleep(self.target_frame_time - elapsed);
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press,
                ..
            }) => match code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.running = false;
                }
                code => {
                    if let Some(action) = action_for_key(code) {
                        log::trace!("action {}", action);
                        self.state.apply(action);
                    }
                }
            },
            Event::Resize(width, height) => {
                self.renderer
                    .resize(width as usize, height.saturating_sub(STATUS_ROWS) as usize);
            }
            _ => {}
        }
    }

    fn render(&mut self) -> io::Result<()> {
        let frame = self.state.frame(&self.compositor);
        self.renderer.present(&frame);

        // Output to terminal
        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, STATUS_ROWS))?;

        self.renderer.draw(&mut stdout)?;

        let mode = match self.state.mode {
            RenderMode::Filled => "filled",
            RenderMode::Wireframe => "wireframe",
        };
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            terminal::Clear(terminal::ClearType::CurrentLine),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "SL3D | FPS: {} | {} | Arrows=Rotate WASD/ZX=Move T=Wireframe Q=Quit",
                self.fps.fps(),
                mode
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}
