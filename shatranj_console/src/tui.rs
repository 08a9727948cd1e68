// Improvement potential. Use `crossterm` instead (fix: for some reason rendering
//   background was more buggy with it).

use console::Style;
use enum_map::EnumMap;
use itertools::Itertools;
use shatranj_client::board::BoardSnapshot;
use shatranj_client::board_view::{BoardView, CellView, FieldShade};
use shatranj_client::force::Force;
use shatranj_client::lobby::LobbyTableRow;
use shatranj_client::piece::piece_to_pictogram;
use strum::IntoEnumIterator;


pub fn render_board(view: &BoardView) -> String {
    let rows = view.rows();
    let col_header = || {
        let mut line = format_square("");
        for cell in rows.first().into_iter().flatten() {
            line.push_str(&format_square(&column_name(cell)));
        }
        line.push_str(&format_square(""));
        line
    };
    let mut ret = col_header();
    ret.push('\n');
    for row in rows {
        let row_name =
            row.first().map_or(String::new(), |cell| (cell.position.row + 1).to_string());
        ret.push_str(&format_square(&row_name));
        for cell in row {
            ret.push_str(&render_cell(cell));
        }
        ret.push_str(&format_square(&row_name));
        ret.push('\n');
    }
    ret.push_str(&col_header());
    ret.push('\n');
    ret
}

fn render_cell(cell: &CellView) -> String {
    let style = if cell.selected_origin {
        Style::new().color256(233).on_color256(150)
    } else {
        match cell.shade {
            FieldShade::Dark => Style::new().color256(233).on_color256(222),
            FieldShade::Light => Style::new().color256(233).on_color256(230),
        }
    };
    let ch = cell.piece.map_or(' ', |piece| piece_to_pictogram(piece.kind, piece.force));
    style.apply_to(format_square(&ch.to_string())).to_string()
}

fn column_name(cell: &CellView) -> String {
    char::from(b'A'.saturating_add(cell.position.col)).to_string()
}

fn format_square(label: &str) -> String { format!("{:^3}", label) }

pub fn render_material(snapshot: &BoardSnapshot) -> String {
    let mut counts: EnumMap<Force, usize> = EnumMap::default();
    for piece in snapshot.pieces() {
        counts[piece.force] += 1;
    }
    Force::iter().map(|force| format!("{} {}", force, counts[force])).join("  ")
}

pub fn render_lobby_table(rows: &[LobbyTableRow]) -> String {
    if rows.is_empty() {
        return "No open games".to_owned();
    }
    let header = format!("{:<8}{:<16}{:<16}{}", "ID", "White", "Black", "");
    let lines = rows.iter().map(|row| {
        let seat = match row.join_as {
            Some(force) => format!("/join {}  (as {})", row.game_id, force),
            None => format!("/join {}", row.game_id),
        };
        format!(
            "{:<8}{:<16}{:<16}{}",
            row.game_id.as_str(),
            row.white.as_deref().unwrap_or("-"),
            row.black.as_deref().unwrap_or("-"),
            seat
        )
    });
    std::iter::once(header.trim_end().to_owned()).chain(lines).join("\n")
}


#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use shatranj_client::board_view::render_board as build_view;
    use shatranj_client::coord::{BoardShape, Position};
    use shatranj_client::display::BoardOrientation;
    use shatranj_client::event::{GameId, LobbyEntry};
    use shatranj_client::lobby::lobby_table;
    use shatranj_client::piece::{Piece, PieceKind};
    use shatranj_client::selection::SelectionState;

    use super::*;

    #[test]
    fn small_board() {
        console::set_colors_enabled(false);
        let snapshot = BoardSnapshot::from_pieces(BoardShape { rows: 2, cols: 3 }, [Piece::new(
            PieceKind::WhiteSarbaz,
            Force::White,
            Position::new(0, 0),
        )])
        .unwrap();
        let view = build_view(&snapshot, &SelectionState::Idle, BoardOrientation::Normal);
        let expected = [
            ["   ", " A ", " B ", " C ", "   "].concat(),
            [" 2 ", "   ", "   ", "   ", " 2 "].concat(),
            [" 1 ", " ♙ ", "   ", "   ", " 1 "].concat(),
            ["   ", " A ", " B ", " C ", "   "].concat(),
            String::new(),
        ]
        .join("\n");
        assert_eq!(render_board(&view), expected);
        assert_eq!(render_material(&snapshot), "WHITE 1  BLACK 0");
    }

    #[test]
    fn lobby_rows() {
        let table = lobby_table(&[
            LobbyEntry {
                id: GameId::new("g1"),
                white: Some("alice".to_owned()),
                black: None,
            },
            LobbyEntry {
                id: GameId::new("2"),
                white: Some("carol".to_owned()),
                black: Some("dave".to_owned()),
            },
        ]);
        let rendered = render_lobby_table(&table);
        let lines = rendered.lines().collect_vec();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "ID      White           Black");
        assert!(lines[1].starts_with("g1      alice           -"));
        assert!(lines[1].ends_with("/join g1  (as BLACK)"));
        assert!(lines[2].starts_with("2       carol           dave"));
        assert!(lines[2].ends_with("/join 2"));
        assert_eq!(render_lobby_table(&[]), "No open games");
    }
}
