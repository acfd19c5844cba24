// Launches a HTTP server, hosting games of _Contagion_.

#[macro_use]
extern crate rocket;

mod config;
mod games;
mod request_types;
mod response_types;
mod router;
mod seat;

use config::ServerConfig;
use games::Games;
use rocket::fairing::AdHoc;
use router::*;

#[launch]
fn rocket() -> _ {
    rocket::build()
        .mount(
            "/",
            routes![
                create_game,
                cure,
                end_turn,
                get_game_state,
                load_game,
                move_pawn,
                select_city,
                treat,
            ],
        )
        .manage(Games::new())
        .attach(AdHoc::config::<ServerConfig>())
        .attach(AdHoc::try_on_ignite("Rules validation", |rocket| async {
            let validation = rocket
                .state::<ServerConfig>()
                .map(|config| config.rules.validate());

            match validation {
                Some(Err(e)) => {
                    log::error!("Invalid rules: {}", e);
                    Err(rocket)
                }
                _ => Ok(rocket),
            }
        }))
}
