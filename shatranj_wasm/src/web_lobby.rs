// Lobby widgets. Join buttons carry `data-game-id`; the page forwards their clicks to
// `WebLobbyClient::join`.

use shatranj_client::lobby::LobbyTableRow;
use shatranj_client::lobby_client::LobbyClientState;

use crate::web_document::WebDocument;
use crate::web_element_ext::WebElementExt;
use crate::web_error_handling::JsResult;


pub const GAMES_TABLE_BODY_NODE_ID: &str = "games_table_body";
pub const NEW_GAME_BUTTON_NODE_ID: &str = "new_game_button";
pub const SETTINGS_FORM_NODE_ID: &str = "settings_form";
pub const WAITING_NODE_ID: &str = "waiting_for_opponent";
pub const WAITING_GAME_ID_NODE_ID: &str = "waiting_game_id";
pub const AUTH_WINDOW_NODE_ID: &str = "auth_window";

fn render_row(
    document: &WebDocument, tbody: &web_sys::Element, row: &LobbyTableRow,
) -> JsResult<()> {
    let tr = tbody.append_new_element(document, "tr")?;
    tr.append_new_element(document, "td")?.with_text_content(row.game_id.as_str());
    let player = tr
        .append_new_element(document, "td")?
        .with_text_content(row.player_name().unwrap_or(""));
    let join = tr.append_new_element(document, "td")?;
    let color_class = row.color_class();
    player.set_classes(color_class);
    join.append_new_element(document, "button")?
        .with_classes(std::iter::once("join_button").chain(color_class))?
        .with_attribute("data-game-id", row.game_id.as_str())?
        .with_text_content(&row.join_label());
    Ok(())
}

// Rebuilt from scratch on every call: each update replaces the whole list.
pub fn render_lobby_page(document: &WebDocument, state: &LobbyClientState) -> JsResult<()> {
    let tbody = document.get_existing_element_by_id(GAMES_TABLE_BODY_NODE_ID)?;
    tbody.remove_all_children();
    for row in state.table() {
        render_row(document, &tbody, &row)?;
    }

    let panels = state.panels();
    for (id, displayed) in [
        (NEW_GAME_BUTTON_NODE_ID, panels.new_game_button),
        (SETTINGS_FORM_NODE_ID, panels.settings_form),
        (WAITING_NODE_ID, panels.waiting_for_opponent),
        (AUTH_WINDOW_NODE_ID, panels.auth_window),
    ] {
        document.get_existing_element_by_id(id)?.set_displayed(displayed)?;
    }
    if let Some(node) = document.get_element_by_id(WAITING_GAME_ID_NODE_ID) {
        node.set_text_content(state.game_id().map(|id| id.as_str()));
    }
    Ok(())
}
