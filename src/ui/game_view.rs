use crate::game::{Board, Cell, MatchState, MatchStatus, Player, SIZE};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Screen columns per board cell.
pub const CELL_WIDTH: u16 = 3;

const HEADER_HEIGHT: u16 = 3;
const BOARD_WIDTH: u16 = SIZE as u16 * CELL_WIDTH + 2;
const BOARD_HEIGHT: u16 = SIZE as u16 + 2;

/// Top-left screen position of cell (0, 0). The board block is anchored
/// at the top-left of the frame, below the header, so this stays a fixed
/// offset the mouse handler can share.
const BOARD_ORIGIN: (u16, u16) = (1, HEADER_HEIGHT + 1);

/// Map an absolute screen position to a board cell. Positions on the
/// border or outside the board return `None`.
pub fn cell_at(column: u16, row: u16) -> Option<(usize, usize)> {
    if column < BOARD_ORIGIN.0 || row < BOARD_ORIGIN.1 {
        return None;
    }

    let x = ((column - BOARD_ORIGIN.0) / CELL_WIDTH) as usize;
    let y = (row - BOARD_ORIGIN.1) as usize;

    if x < SIZE && y < SIZE {
        Some((x, y))
    } else {
        None
    }
}

pub fn render(
    frame: &mut Frame,
    state: &MatchState,
    cursor: Option<(usize, usize)>,
    message: &Option<String>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Length(BOARD_HEIGHT),
            Constraint::Length(3), // Message
            Constraint::Length(3), // Controls
        ])
        .split(frame.area());

    let main = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(BOARD_WIDTH), Constraint::Min(22)])
        .split(chunks[1]);

    render_header(frame, state, chunks[0]);
    render_board(frame, state.board(), cursor, main[0]);
    render_side_panel(frame, state, main[1]);
    render_message(frame, message, chunks[2]);
    render_controls(frame, chunks[3]);
}

fn player_color(player: Player) -> Color {
    match player {
        Player::Cross => Color::Blue,
        Player::Nought => Color::Red,
    }
}

fn render_header(frame: &mut Frame, state: &MatchState, area: ratatui::layout::Rect) {
    let (text, color) = match state.status() {
        MatchStatus::InProgress => {
            let player = state.current_player();
            (
                format!("{}'s Turn ({})", player.name(), player.symbol()),
                player_color(player),
            )
        }
        MatchStatus::Won(winner) => (format!("{} Wins!", winner.name()), player_color(winner)),
        MatchStatus::Draw => ("Draw!".to_string(), Color::White),
        MatchStatus::TimedOut(winner) => (
            format!("{} Wins on Time!", winner.name()),
            player_color(winner),
        ),
    };

    let header = Paragraph::new(text)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Five in a Row"),
        );

    frame.render_widget(header, area);
}

fn render_board(
    frame: &mut Frame,
    board: &Board,
    cursor: Option<(usize, usize)>,
    area: ratatui::layout::Rect,
) {
    let mut lines = Vec::new();

    for y in 0..SIZE {
        let mut spans = Vec::new();

        for x in 0..SIZE {
            let (symbol, color) = match board.get(x, y) {
                Cell::Empty => (" . ", Color::DarkGray),
                Cell::Cross => (" X ", Color::Blue),
                Cell::Nought => (" O ", Color::Red),
            };

            let mut style = Style::default().fg(color);
            if cursor == Some((x, y)) {
                style = style.bg(Color::DarkGray).add_modifier(Modifier::BOLD);
            }

            spans.push(Span::styled(symbol, style));
        }

        lines.push(Line::from(spans));
    }

    let board_widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Board"),
    );

    frame.render_widget(board_widget, area);
}

fn render_side_panel(frame: &mut Frame, state: &MatchState, area: ratatui::layout::Rect) {
    let p1_style = Style::default().fg(player_color(Player::Cross));
    let p2_style = Style::default().fg(player_color(Player::Nought));

    let lines = vec![
        Line::from(Span::styled("Player 1 (X) Time:", p1_style)),
        Line::from(Span::styled(
            format!("  {}", format_time(state.remaining_time(Player::Cross))),
            p1_style.add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled("Player 2 (O) Time:", p2_style)),
        Line::from(Span::styled(
            format!("  {}", format_time(state.remaining_time(Player::Nought))),
            p2_style.add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!("Moves: {}", state.move_count())),
        Line::from(""),
        Line::from(Span::styled("10x10 grid", Style::default().fg(Color::Gray))),
        Line::from(Span::styled(
            "5 in a row wins",
            Style::default().fg(Color::Gray),
        )),
    ];

    let panel = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Match"));

    frame.render_widget(panel, area);
}

fn render_message(frame: &mut Frame, message: &Option<String>, area: ratatui::layout::Rect) {
    let text = message.as_deref().unwrap_or("");
    let msg_widget = Paragraph::new(text)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(msg_widget, area);
}

fn render_controls(frame: &mut Frame, area: ratatui::layout::Rect) {
    let line = Line::from("Click/Enter: Place  |  Arrows: Move Cursor  |  R: Restart  |  Q: Quit");

    let controls = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Controls"));

    frame.render_widget(controls, area);
}

/// Format seconds as M:SS, truncating like a countdown display.
pub fn format_time(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(300.0), "5:00");
        assert_eq!(format_time(65.4), "1:05");
        assert_eq!(format_time(9.99), "0:09");
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(-3.0), "0:00");
    }

    #[test]
    fn test_cell_at_first_cell() {
        // Any of the three columns of a cell map back to it
        assert_eq!(cell_at(1, 4), Some((0, 0)));
        assert_eq!(cell_at(2, 4), Some((0, 0)));
        assert_eq!(cell_at(3, 4), Some((0, 0)));
        assert_eq!(cell_at(4, 4), Some((1, 0)));
    }

    #[test]
    fn test_cell_at_last_cell() {
        assert_eq!(cell_at(28, 13), Some((9, 9)));
        assert_eq!(cell_at(30, 13), Some((9, 9)));
    }

    #[test]
    fn test_cell_at_borders() {
        // Left and top board borders
        assert_eq!(cell_at(0, 4), None);
        assert_eq!(cell_at(1, 3), None);
        // Right and bottom board borders
        assert_eq!(cell_at(31, 4), None);
        assert_eq!(cell_at(1, 14), None);
    }

    #[test]
    fn test_cell_at_outside_board() {
        assert_eq!(cell_at(0, 0), None);
        assert_eq!(cell_at(50, 20), None);
    }
}
