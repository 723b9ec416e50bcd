use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use volt::app::Workbench;
use volt::core::InputEvent;
use volt::services::EditorConfig;

const TICK_INTERVAL: Duration = Duration::from_millis(50);

fn main() -> io::Result<()> {
    let _logging = volt::logging::init();

    let mut workbench = Workbench::new(EditorConfig::default());
    if let Some(arg) = std::env::args().nth(1) {
        let path = PathBuf::from(arg);
        if path.exists() {
            workbench.open_path(&path);
        } else {
            tracing::warn!(path = %path.display(), "path given on command line does not exist");
        }
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut workbench);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    workbench: &mut Workbench,
) -> io::Result<()> {
    loop {
        terminal.draw(|frame| workbench.render(frame, frame.area()))?;

        if event::poll(TICK_INTERVAL)? {
            let input: InputEvent = match event::read()? {
                Event::Key(key) if key.kind == event::KeyEventKind::Release => continue,
                other => other.into(),
            };
            if workbench.handle_input(&input).is_quit() {
                return Ok(());
            }
        }

        workbench.tick(Instant::now());
    }
}
