use std::{cell::Cell, fs::File, io, path::PathBuf, sync::Arc};

use clap::Parser;
use crossterm::{
    event::{
        self as term, DisableMouseCapture, EnableMouseCapture, KeyCode, KeyEvent, KeyEventKind,
        MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use nattty::{
    dispatch, key_index, move_cursor, Event, GameState, Mark, Nudge, Outcome, Response, SQUARES,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use tui::{
    backend::{Backend, CrosstermBackend},
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
    Frame, Terminal,
};

/// Two-player tic-tac-toe in the terminal.
#[derive(Parser, Debug)]
#[command(name = "ttt-tui", version)]
struct Cli {
    /// Where to write logs; the screen belongs to the board
    #[arg(long, default_value = "nattty.log")]
    log_file: PathBuf,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    let log_file = File::create(&cli.log_file)?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .try_init();

    info!("starting ttt-tui");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new();
    let result = run(&mut terminal, &mut app);

    // restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    info!(scores = %app.game.score_summary(), "goodbye");
    result
}

fn run<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| app.draw(f))?;

        match term::read()? {
            term::Event::Key(key) if key.kind == KeyEventKind::Press => {
                if !app.handle_key(key) {
                    return Ok(());
                }
            }
            term::Event::Mouse(mouse) => app.handle_mouse(mouse),
            _ => {}
        }
    }
}

/// A finished round waiting to be acknowledged.
struct Notice {
    title: &'static str,
    message: String,
}

struct App {
    game: GameState,
    cursor: usize,
    notice: Option<Notice>,
    /// Screen area of each square as of the last draw, for mouse clicks.
    squares: Cell<[Rect; SQUARES]>,
}

impl App {
    fn new() -> App {
        App {
            game: GameState::new(),
            cursor: 4,
            notice: None,
            squares: Cell::new([Rect::default(); SQUARES]),
        }
    }

    /// Returns false once the player asks to quit.
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        if self.notice.take().is_some() {
            return true;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return false,
            KeyCode::Char('r') => self.send(Event::Reset),
            KeyCode::Up => self.cursor = move_cursor(self.cursor, Nudge::Up),
            KeyCode::Down => self.cursor = move_cursor(self.cursor, Nudge::Down),
            KeyCode::Left => self.cursor = move_cursor(self.cursor, Nudge::Left),
            KeyCode::Right => self.cursor = move_cursor(self.cursor, Nudge::Right),
            KeyCode::Enter | KeyCode::Char(' ') => self.send(Event::Place(self.cursor)),
            KeyCode::Char(c) => {
                if let Some(index) = key_index(c) {
                    self.cursor = index;
                    self.send(Event::Place(index));
                }
            }
            _ => {}
        }
        true
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        if self.notice.take().is_some() {
            return;
        }

        let hit = self.squares.get().iter().position(|r| {
            mouse.column >= r.x
                && mouse.column < r.right()
                && mouse.row >= r.y
                && mouse.row < r.bottom()
        });
        if let Some(index) = hit {
            self.cursor = index;
            self.send(Event::Place(index));
        }
    }

    fn send(&mut self, event: Event) {
        match dispatch(&mut self.game, event) {
            Response::Moved(Outcome::Win { winner, .. }) => {
                self.notice = Some(Notice {
                    title: "Winner",
                    message: format!("Player {} wins!", winner),
                });
            }
            Response::Moved(Outcome::Draw) => {
                self.notice = Some(Notice {
                    title: "Draw",
                    message: "The game is a draw.".to_string(),
                });
            }
            Response::Moved(Outcome::Continue(_)) => {}
            Response::Ignored => debug!(?event, "square not playable"),
            Response::Reset => self.cursor = 4,
        }
    }

    fn draw<B: Backend>(&self, f: &mut Frame<B>) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .margin(2)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)].as_ref())
            .split(f.size());
        let block = Block::default().title("Board").borders(Borders::ALL);
        self.draw_board(f, block.inner(chunks[0]));
        f.render_widget(block, chunks[0]);

        let block = Block::default().title("Game Info").borders(Borders::ALL);
        self.draw_info(f, block.inner(chunks[1]));
        f.render_widget(block, chunks[1]);

        if let Some(notice) = &self.notice {
            let area = centered_rect(40, 20, f.size());
            let popup = Paragraph::new(vec![
                Spans::from(Span::styled(
                    notice.message.as_str(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Spans::from(""),
                Spans::from("press any key"),
            ])
            .alignment(Alignment::Center)
            .block(Block::default().title(notice.title).borders(Borders::ALL));
            f.render_widget(Clear, area);
            f.render_widget(popup, area);
        }
    }

    fn draw_info<B: Backend>(&self, f: &mut Frame<B>, area: Rect) {
        let scores = self.game.score_summary();
        let turn = if self.game.is_terminal() {
            "Round over".to_string()
        } else {
            format!("Turn: {}", self.game.current_player())
        };
        let text = vec![
            Spans::from(Span::styled(
                turn,
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Spans::from(""),
            Spans::from(format!("X: {}", scores.x)),
            Spans::from(format!("O: {}", scores.o)),
            Spans::from(format!("Draws: {}", scores.draws)),
            Spans::from(""),
            Spans::from("arrows  move"),
            Spans::from("enter   mark"),
            Spans::from("1-9     mark square"),
            Spans::from("r       reset board"),
            Spans::from("q       quit"),
        ];
        f.render_widget(Paragraph::new(text), area);
    }

    fn draw_board<B: Backend>(&self, f: &mut Frame<B>, area: Rect) {
        let thirds = [
            Constraint::Percentage(5),
            Constraint::Percentage(30),
            Constraint::Percentage(30),
            Constraint::Percentage(30),
            Constraint::Percentage(5),
        ];
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(thirds.as_ref())
            .split(area);

        let winning_line = self.game.winning_line();
        let mut squares = [Rect::default(); SQUARES];
        for row in 0..3 {
            let cols = Layout::default()
                .direction(Direction::Horizontal)
                .horizontal_margin(3)
                .constraints(thirds.as_ref())
                .split(rows[row + 1]);

            for col in 0..3 {
                let index = row * 3 + col;
                let chunk = cols[col + 1];
                squares[index] = chunk;

                let mut style = Style::default();
                if !self.game.is_playable(index) {
                    style = style.add_modifier(Modifier::DIM);
                }
                if winning_line.map_or(false, |line| line.contains(&index)) {
                    style = style.bg(Color::Green).remove_modifier(Modifier::DIM);
                }
                let mut border_style = Style::default();
                if index == self.cursor && !self.game.is_terminal() {
                    border_style = border_style.fg(Color::Yellow);
                }

                let block = Block::default()
                    .borders(Borders::ALL)
                    .border_style(border_style)
                    .style(style)
                    .title(Span::styled((index + 1).to_string(), Style::default()));
                let mark = RenderMark(self.game.board().get(index), style);
                f.render_widget(mark, block.inner(chunk));
                f.render_widget(block, chunk);
            }
        }
        self.squares.set(squares);
    }
}

struct RenderMark(Option<Mark>, Style);

impl Widget for RenderMark {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 3 || area.height < 1 {
            return;
        }
        match self.0 {
            Some(Mark::X) => render_x(area, buf, self.1),
            Some(Mark::O) => render_o(area, buf, self.1),
            None => {}
        }
    }
}

fn render_x(area: Rect, buf: &mut Buffer, style: Style) {
    for y in 0..area.height {
        // Column reached by each stroke on this line, scaled to the cell width.
        let offset = u32::from(y) * u32::from(area.width - 1) / u32::from(area.height.max(2) - 1);
        let offset = offset as u16;
        let left = offset.min(area.width - 1);
        let right = (area.width - 1).saturating_sub(offset);
        buf.set_string(area.x + left, area.y + y, "\\", style);
        buf.set_string(area.x + right, area.y + y, "/", style);
    }
}

fn render_o(area: Rect, buf: &mut Buffer, style: Style) {
    let rx = f32::from(area.width - 1) / 2.0;
    let ry = f32::from(area.height.max(2) - 1) / 2.0;
    let cx = f32::from(area.x) + rx;
    let cy = f32::from(area.y) + ry;

    let steps = 4 * (area.width + area.height);
    for step in 0..steps {
        let angle = f32::from(step) / f32::from(steps) * std::f32::consts::TAU;
        let (sin, cos) = angle.sin_cos();
        let x = (cx + rx * cos).round() as u16;
        let y = (cy + ry * sin).round() as u16;
        if x >= area.x && x < area.right() && y >= area.y && y < area.bottom() {
            buf.get_mut(x, y).set_char('@').set_style(style);
        }
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Percentage((100 - percent_y) / 2),
                Constraint::Percentage(percent_y),
                Constraint::Percentage((100 - percent_y) / 2),
            ]
            .as_ref(),
        )
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            [
                Constraint::Percentage((100 - percent_x) / 2),
                Constraint::Percentage(percent_x),
                Constraint::Percentage((100 - percent_x) / 2),
            ]
            .as_ref(),
        )
        .split(vertical[1])[1]
}
