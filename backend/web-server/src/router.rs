use crate::config::ServerConfig;
use crate::games::{self, Games, PlayerAction, SeatedGame};
use crate::request_types::*;
use crate::response_types::*;

use contagion::manager::GameState;
use rocket::http::{CookieJar, Status};
use rocket::response::{content::RawJson, status::Custom, Redirect};
use rocket::serde::json::Json;
use rocket::State;
use uuid::Uuid;

#[inline]
fn game_state_to_json(game_state: &GameState) -> Result<RawJson<String>, String> {
    serde_json::to_string(game_state)
        .map(RawJson)
        .map_err(|e| format!("Could not serialize the game state: {}", e))
}

#[post("/create")]
pub fn create_game(
    games: &State<Games>,
    config: &State<ServerConfig>,
) -> Result<Redirect, Custom<String>> {
    match games::create_game(games, config) {
        Ok(game_id) => Ok(Redirect::to(uri!(load_game(game_id)))),
        Err(e) => {
            log::error!("Could not create a game: {}", e);
            Err(Custom(Status::InternalServerError, e))
        }
    }
}

#[get("/game/<game_id>")]
pub fn load_game(
    game_id: Uuid,
    cookies: &CookieJar<'_>,
    games: &State<Games>,
) -> Result<RawJson<String>, LoadGameError> {
    let manager = games::take_seat(games, cookies, game_id)?;

    game_state_to_json(&manager.get_state()).map_err(LoadGameError::Unserializable)
}

#[get("/game/<_>/state")]
pub fn get_game_state(seated_game: SeatedGame) -> Result<RawJson<String>, Custom<String>> {
    game_state_to_json(&seated_game.manager().get_state())
        .map_err(|e| Custom(Status::InternalServerError, e))
}

#[put("/game/<_>/selection", format = "json", data = "<select_city_request>")]
pub fn select_city(
    mut seated_game: SeatedGame,
    select_city_request: Json<SelectCityRequest>,
) -> Json<ActionResponse> {
    Json(seated_game.play(PlayerAction::Select(select_city_request.city)))
}

#[post("/game/<_>/move")]
pub fn move_pawn(mut seated_game: SeatedGame) -> Json<ActionResponse> {
    Json(seated_game.play(PlayerAction::Move))
}

#[post("/game/<_>/treat")]
pub fn treat(mut seated_game: SeatedGame) -> Json<ActionResponse> {
    Json(seated_game.play(PlayerAction::Treat))
}

#[post("/game/<_>/cure")]
pub fn cure(mut seated_game: SeatedGame) -> Json<ActionResponse> {
    Json(seated_game.play(PlayerAction::Cure))
}

#[post("/game/<_>/end_turn")]
pub fn end_turn(mut seated_game: SeatedGame) -> Json<ActionResponse> {
    Json(seated_game.play(PlayerAction::EndTurn))
}
