// Board and game page widgets. Cells carry `data-row`/`data-col`; the page forwards clicks
// on `.clickable` cells to `WebGameClient::click_cell`.

use shatranj_client::board_view::BoardView;
use shatranj_client::coord::Position;
use shatranj_client::game_client::GameClientState;

use crate::web_document::WebDocument;
use crate::web_element_ext::WebElementExt;
use crate::web_error_handling::JsResult;


pub const BOARD_NODE_ID: &str = "board";
pub const STATUS_NODE_ID: &str = "status";
pub const MOVE_LOG_NODE_ID: &str = "move_log";
pub const DRAW_MENU_NODE_ID: &str = "draw_menu";

pub fn cell_node_id(pos: Position) -> String { format!("cell-{}-{}", pos.row, pos.col) }

fn board_row_node_id(display_row: usize) -> String { format!("board-row-{}", display_row) }

// The grid is built on first call; afterwards only class lists change.
pub fn render_board(document: &WebDocument, view: &BoardView) -> JsResult<()> {
    let board = document.get_existing_element_by_id(BOARD_NODE_ID)?;
    for (y, row) in view.rows().iter().enumerate() {
        let row_node = document.ensure_node("div", &board_row_node_id(y), &board)?;
        row_node.set_classes(["board_row"]);
        for cell in row {
            let node = document.ensure_node("div", &cell_node_id(cell.position), &row_node)?;
            node.set_attribute("data-row", &cell.position.row.to_string())?;
            node.set_attribute("data-col", &cell.position.col.to_string())?;
            node.set_classes(cell.css_classes(view.orientation()));
        }
    }
    Ok(())
}

pub fn render_game_page(document: &WebDocument, state: &GameClientState) -> JsResult<()> {
    render_board(document, &state.board_view())?;

    let status = document.get_existing_element_by_id(STATUS_NODE_ID)?;
    status.set_text_content(Some(&state.status_line()));

    // The log only grows, so only the missing tail is appended.
    let move_log = document.get_existing_element_by_id(MOVE_LOG_NODE_ID)?;
    let mut shown = usize::try_from(move_log.child_element_count()).unwrap_or(0);
    if shown > state.move_log().len() {
        move_log.remove_all_children();
        shown = 0;
    }
    for mv in state.move_log().iter().skip(shown) {
        move_log.append_new_element(document, "li")?.with_text_content(mv);
    }

    let draw_menu = document.get_existing_element_by_id(DRAW_MENU_NODE_ID)?;
    if draw_menu.is_displayed() != state.draw_offer_visible() {
        draw_menu.set_displayed(state.draw_offer_visible())?;
    }
    Ok(())
}
