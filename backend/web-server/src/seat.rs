//! Every game has a single seat. The browser sitting at a game holds a private cookie
//! carrying the game ID, scoped to the game's URLs.

use parse_display::Display;
use rocket::http::{Cookie, CookieJar, Status};
use rocket::request::{FromRequest, Outcome, Request};
use uuid::Uuid;

/// Name of the private cookie holding the seat.
pub(crate) const SEAT_COOKIE_NAME: &str = "seat";

/// Why a request could not be matched to a seat.
#[derive(Clone, Copy, Debug, Display, PartialEq)]
pub enum SeatError {
    #[display("the URL does not name a game")]
    MalformedGameId,
    #[display("no seat cookie")]
    MissingCookie,
    #[display("the seat cookie is unreadable")]
    UnreadableCookie,
    #[display("the seat cookie belongs to another game")]
    OtherGame,
}

impl SeatError {
    fn status(self) -> Status {
        match self {
            SeatError::MalformedGameId => Status::NotFound,
            _ => Status::Unauthorized,
        }
    }
}

/// Proof that a request comes from the browser sitting at a game.
///
/// Implements [`FromRequest`] for routes under `/game/<game_id>`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Seat {
    game_id: Uuid,
}

impl Seat {
    #[inline]
    pub(crate) fn game_id(&self) -> Uuid {
        self.game_id
    }

    /// Path every seat cookie of `game_id` is scoped to.
    pub(crate) fn game_path(game_id: Uuid) -> String {
        format!("/game/{}", game_id)
    }

    /// Reads the seat of `game_id` out of the cookies sent with the request.
    pub(crate) fn held(cookies: &CookieJar, game_id: Uuid) -> Result<Self, SeatError> {
        let cookie = cookies
            .get_private(SEAT_COOKIE_NAME)
            .ok_or(SeatError::MissingCookie)?;
        let held_game_id =
            Uuid::parse_str(cookie.value()).map_err(|_| SeatError::UnreadableCookie)?;

        if held_game_id != game_id {
            return Err(SeatError::OtherGame);
        }

        Ok(Self { game_id })
    }

    /// Hands the seat of `game_id` over to the browser behind `cookies`.
    pub(crate) fn hand_over(cookies: &CookieJar, game_id: Uuid) -> Self {
        cookies.add_private(
            Cookie::build((SEAT_COOKIE_NAME, game_id.to_string())).path(Self::game_path(game_id)),
        );

        Self { game_id }
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for Seat {
    type Error = SeatError;

    async fn from_request(req: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        // Segment 0 is `game`.
        let seat = match req.param::<Uuid>(1) {
            Some(Ok(game_id)) if req.uri().path().starts_with("/game/") => {
                Self::held(req.cookies(), game_id)
            }
            _ => Err(SeatError::MalformedGameId),
        };

        match seat {
            Ok(seat) => Outcome::Success(seat),
            Err(e) => {
                log::debug!("Refused {}: {}.", req.uri(), e);
                Outcome::Error((e.status(), e))
            }
        }
    }
}
