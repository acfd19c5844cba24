use contagion::city::City;
use rocket::serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct SelectCityRequest {
    pub city: City,
}
