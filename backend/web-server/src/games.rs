//! The games hosted by the server, and how a request reaches the one it plays.

use crate::config::ServerConfig;
use crate::response_types::{ActionResponse, LoadGameError};
use crate::seat::{Seat, SeatError};

use contagion::{city::City, manager::Manager};
use dashmap::{mapref::one::RefMut, DashMap};
use rocket::http::{CookieJar, Status};
use rocket::request::{FromRequest, Outcome, Request};
use uuid::Uuid;

/// Every hosted game, by ID. Each request locks the shard of the game it targets.
pub type Games = DashMap<Uuid, Manager>;

/// Something the seated player asks for.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum PlayerAction {
    Select(City),
    Move,
    Treat,
    Cure,
    EndTurn,
}

/// Creates a game following the server's configuration, and returns its ID.
pub(crate) fn create_game(games: &Games, config: &ServerConfig) -> Result<Uuid, String> {
    let manager = config.new_manager()?;
    let game_id = Uuid::new_v4();

    games.insert(game_id, manager);
    log::info!("Created game {}.", game_id);

    Ok(game_id)
}

/// Seats the browser behind `cookies` at `game_id`, unless another browser sits there.
///
/// The browser already holding the seat is let back in.
pub(crate) fn take_seat<'a>(
    games: &'a Games,
    cookies: &CookieJar,
    game_id: Uuid,
) -> Result<RefMut<'a, Uuid, Manager>, LoadGameError> {
    let mut manager = games
        .get_mut(&game_id)
        .ok_or_else(|| LoadGameError::NoGame(format!("No game {}.", game_id)))?;

    if Seat::held(cookies, game_id).is_ok() {
        return Ok(manager);
    }

    if !manager.claim() {
        return Err(LoadGameError::Unauthorized(String::from(
            "This game is already being played.",
        )));
    }

    Seat::hand_over(cookies, game_id);
    log::info!("Seated a player at game {}.", game_id);

    Ok(manager)
}

/// Why a request could not reach its game.
#[derive(Debug, PartialEq)]
pub enum SeatedGameError {
    Seat(SeatError),
    NoGame,
    /// [`Games`] is not managed by the server.
    Unmanaged,
}

/// The game of the seated player, locked until the request is done.
///
/// Only built as a request guard, once the [`Seat`] is verified.
pub struct SeatedGame<'a> {
    entry: RefMut<'a, Uuid, Manager>,
}

impl<'a> SeatedGame<'a> {
    #[inline]
    pub(crate) fn manager(&self) -> &Manager {
        self.entry.value()
    }

    pub(crate) fn play(&mut self, action: PlayerAction) -> ActionResponse {
        let game_id = *self.entry.key();
        let manager = self.entry.value_mut();

        let result = match action {
            PlayerAction::Select(city) => {
                manager.select_city(city);
                Ok(())
            }
            PlayerAction::Move => manager.move_to_selected(),
            PlayerAction::Treat => manager.treat(),
            PlayerAction::Cure => manager.cure(),
            PlayerAction::EndTurn => manager.end_turn(),
        };

        if let Err(e) = &result {
            log::debug!("Game {} refused {:?}: {}", game_id, action, e);
        }

        ActionResponse::new(result)
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for SeatedGame<'r> {
    type Error = SeatedGameError;

    async fn from_request(req: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let seat = match req.guard::<Seat>().await {
            Outcome::Success(seat) => seat,
            Outcome::Error((status, e)) => {
                return Outcome::Error((status, SeatedGameError::Seat(e)))
            }
            Outcome::Forward(status) => return Outcome::Forward(status),
        };

        let games = match req.rocket().state::<Games>() {
            Some(games) => games,
            None => {
                log::error!("The server does not manage any `Games`.");
                return Outcome::Error((Status::InternalServerError, SeatedGameError::Unmanaged));
            }
        };

        match games.get_mut(&seat.game_id()) {
            Some(entry) => Outcome::Success(Self { entry }),
            None => Outcome::Error((Status::NotFound, SeatedGameError::NoGame)),
        }
    }
}
