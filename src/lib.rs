#[macro_use]
extern crate rocket;

pub mod api;
pub mod catalog;
pub mod database;
pub mod db;
pub mod env;
pub mod error;
pub mod models;
pub mod scoring;
pub mod telemetry;
pub mod validation;
#[cfg(test)]
mod test;

use rocket::{Build, Rocket};
use sqlx::{Pool, Sqlite};
use tracing::info;

use api::{
    api_add_feedback, api_dashboard, api_get_assessment, api_get_courses, api_submit_assessment,
    health,
};
use telemetry::TelemetryFairing;

pub fn init_rocket(pool: Pool<Sqlite>) -> Rocket<Build> {
    info!("Starting course recommender");

    rocket::build()
        .manage(pool)
        .mount(
            "/api",
            routes![
                health,
                api_get_courses,
                api_submit_assessment,
                api_get_assessment,
                api_add_feedback,
                api_dashboard,
            ],
        )
        .attach(TelemetryFairing)
}
