use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use blockfall::game::{Cell, SessionView};

pub fn ui(f: &mut Frame, view: &SessionView) {
    let size = f.size();

    // two characters per cell plus the border
    let board_width = (view.board.width() * 2 + 2) as u16;
    let board_height = (view.board.height() + 2) as u16;

    let vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(board_height),
            Constraint::Min(0),
        ])
        .split(size);

    let horizontal_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(15),
            Constraint::Length(board_width),
            Constraint::Length(15),
            Constraint::Min(0),
        ])
        .split(vertical_chunks[1]);

    let board_area = horizontal_chunks[2];

    render_board(f, view, board_area);
    render_score(f, view, horizontal_chunks[1]);
    render_controls(f, horizontal_chunks[3]);

    if view.lost {
        render_lost_overlay(f, view, board_area);
    }
}

/// Locked cells with the falling piece drawn on top.
fn compose_cells(view: &SessionView) -> Vec<Vec<Cell>> {
    let mut cells: Vec<Vec<Cell>> = view.board.rows().map(<[Cell]>::to_vec).collect();
    let (x, y) = view.position;
    for (bx, by) in view.piece.blocks_at(x, y) {
        if bx >= 0 && by >= 0 {
            if let Some(cell) = cells
                .get_mut(by as usize)
                .and_then(|row| row.get_mut(bx as usize))
            {
                *cell = Cell::Filled(view.piece.color);
            }
        }
    }
    cells
}

fn render_board(f: &mut Frame, view: &SessionView, area: Rect) {
    let board_lines: Vec<Line> = compose_cells(view)
        .iter()
        .enumerate()
        .map(|(y, row)| {
            let spans: Vec<Span> = row
                .iter()
                .enumerate()
                .map(|(x, cell)| match cell {
                    Cell::Empty if (x + y) % 2 == 0 => {
                        Span::styled("░░", Style::default().fg(Color::DarkGray))
                    }
                    Cell::Empty => Span::raw("  "),
                    Cell::Filled(color) => Span::styled("██", Style::default().fg(*color)),
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    let board_widget = Paragraph::new(board_lines)
        .block(Block::default().borders(Borders::ALL).title("blockfall"));

    f.render_widget(board_widget, area);
}

fn render_score(f: &mut Frame, view: &SessionView, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(0)])
        .split(area);

    let score_text = vec![
        Line::from(vec![Span::styled("Score", Style::default().fg(Color::Cyan))]),
        Line::from(vec![Span::raw("")]),
        Line::from(vec![Span::raw(view.score.to_string())]),
    ];

    let score_widget = Paragraph::new(score_text)
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center);

    f.render_widget(score_widget, chunks[0]);
}

fn render_controls(f: &mut Frame, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(9), Constraint::Min(0)])
        .split(area);

    let controls_text = vec![
        Line::from(vec![Span::raw("← → move")]),
        Line::from(vec![Span::raw("↓   drop")]),
        Line::from(vec![Span::raw("↑   rotate")]),
        Line::from(vec![Span::raw("")]),
        Line::from(vec![Span::raw("r   restart")]),
        Line::from(vec![Span::raw("q   quit")]),
    ];

    let controls_widget = Paragraph::new(controls_text)
        .block(Block::default().borders(Borders::ALL).title("Keys"));

    f.render_widget(controls_widget, chunks[0]);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

fn render_lost_overlay(f: &mut Frame, view: &SessionView, area: Rect) {
    let popup_area = centered_rect(70, 40, area);
    f.render_widget(Clear, popup_area);

    let lost_text = vec![
        Line::from(vec![Span::raw("")]),
        Line::from(vec![Span::styled("GAME OVER", Style::default().fg(Color::Red))]),
        Line::from(vec![Span::raw("")]),
        Line::from(vec![Span::raw(format!("Score: {}", view.score))]),
        Line::from(vec![Span::raw("")]),
        Line::from(vec![Span::raw("R to restart")]),
        Line::from(vec![Span::raw("Q to quit")]),
    ];

    let lost_widget = Paragraph::new(lost_text)
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center);

    f.render_widget(lost_widget, popup_area);
}

#[cfg(test)]
mod tests {
    use blockfall::{
        game::{Board, Piece, Session, ShapeKind},
        GameConfig,
    };

    use super::*;

    #[test]
    fn test_compose_overlays_piece_on_board() {
        let mut board = Board::new(4, 4).unwrap();
        board.set(0, 3, Cell::Filled(Color::Gray));
        let piece = Piece::new(ShapeKind::O);
        let color = piece.color;
        let session = Session::with_state(GameConfig::new(4, 4), board, piece, (2, 1)).unwrap();

        let cells = compose_cells(&session.view());

        assert_eq!(cells[3][0], Cell::Filled(Color::Gray));
        for (x, y) in [(2, 1), (3, 1), (2, 2), (3, 2)] {
            assert_eq!(cells[y][x], Cell::Filled(color));
        }
        let filled = cells.iter().flatten().filter(|c| c.is_filled()).count();
        assert_eq!(filled, 5);
    }
}
