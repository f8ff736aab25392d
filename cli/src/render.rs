use core::fmt;
use minefield_core::{Cell, GameSession, GameStatus};

/// `MM:SS`, minutes keep growing past 99.
pub(crate) fn format_elapsed(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Three-digit counter; an over-flagged board shows a leading minus.
pub(crate) fn format_counter(value: i32) -> String {
    format!("{value:03}")
}

fn status_face(status: GameStatus) -> &'static str {
    match status {
        GameStatus::Playing => ":)",
        GameStatus::Won => "B)",
        GameStatus::Lost => "X(",
    }
}

fn cell_glyph(cell: &Cell) -> char {
    if cell.is_flagged {
        'F'
    } else if !cell.is_revealed {
        '#'
    } else if cell.is_mine {
        '*'
    } else if cell.is_open_zero() {
        '.'
    } else {
        char::from(b'0' + cell.neighbor_mines)
    }
}

/// Text rendering of a session: counters on top, then the grid with column and row labels.
pub(crate) struct SessionView<'a>(pub &'a GameSession);

impl fmt::Display for SessionView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let session = self.0;
        let board = session.board();

        writeln!(
            f,
            "Mines: {}   {}   Time: {}",
            format_counter(session.remaining_mines()),
            status_face(session.status()),
            format_elapsed(session.time_elapsed())
        )?;

        write!(f, "    ")?;
        for x in 0..board.width() {
            write!(f, " {}", x % 10)?;
        }
        writeln!(f)?;

        for (y, row) in board.rows().enumerate() {
            write!(f, "{y:>3} ")?;
            for cell in row {
                write!(f, " {}", cell_glyph(cell))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
