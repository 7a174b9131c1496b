//! HTTP API over the query facade
//!
//! Five JSON endpoints mounted under /api. The engine is loaded once
//! before launch and managed as immutable state; every handler is a
//! pure read.

use rocket::serde::json::Json;
use rocket::{get, routes, Build, Rocket, State};
use serde_json::Value;

use crate::query::{error_payload, respond, Engine};
use crate::{Result, ServerConfig};

#[get("/")]
fn index() -> &'static str {
    "cricket statistics api"
}

#[get("/teams")]
fn teams(engine: &State<Engine>) -> Json<Value> {
    Json(respond(Ok(engine.teams())))
}

#[get("/team-vs-team?<team1>&<team2>")]
fn team_vs_team(
    engine: &State<Engine>,
    team1: Option<String>,
    team2: Option<String>,
) -> Json<Value> {
    match (team1, team2) {
        (Some(t1), Some(t2)) => Json(respond(engine.team_vs_team(&t1, &t2))),
        _ => Json(error_payload()),
    }
}

#[get("/team-record?<team>")]
fn team_record(engine: &State<Engine>, team: Option<String>) -> Json<Value> {
    match team {
        Some(team) => Json(respond(engine.team_record(&team))),
        None => Json(error_payload()),
    }
}

#[get("/batsman?<name>")]
fn batsman(engine: &State<Engine>, name: Option<String>) -> Json<Value> {
    // Player names are unvalidated: a missing or unknown name yields
    // the zero/infinity block
    let name = name.unwrap_or_default();
    Json(respond(Ok(engine.batsman_record(&name))))
}

#[get("/bowler?<name>")]
fn bowler(engine: &State<Engine>, name: Option<String>) -> Json<Value> {
    let name = name.unwrap_or_default();
    Json(respond(Ok(engine.bowler_record(&name))))
}

/// Build the rocket instance serving the given engine
pub fn rocket(engine: Engine, config: &ServerConfig) -> Rocket<Build> {
    let figment = rocket::Config::figment()
        .merge(("address", config.address.clone()))
        .merge(("port", config.port));
    rocket::custom(figment)
        .mount("/", routes![index])
        .mount("/api", routes![teams, team_vs_team, team_record, batsman, bowler])
        .manage(engine)
}

/// Launch the API server, blocking until shutdown
pub fn serve(engine: Engine, config: &ServerConfig) -> Result<()> {
    rocket::execute(rocket(engine, config).launch())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::CricketData;
    use crate::{MatchId, MatchRecord};
    use chrono::NaiveDate;
    use rocket::http::Status;
    use rocket::local::blocking::Client;

    fn make_match(id: i64, team1: &str, team2: &str, winner: Option<&str>) -> MatchRecord {
        MatchRecord {
            id: MatchId(id),
            date: NaiveDate::from_ymd_opt(2022, 4, 2).unwrap(),
            team1: team1.to_string(),
            team2: team2.to_string(),
            match_number: "1".to_string(),
            winning_team: winner.map(str::to_string),
            player_of_match: None,
        }
    }

    fn client() -> Client {
        let matches = vec![
            make_match(1, "Kings", "Royals", Some("Kings")),
            make_match(2, "Royals", "Kings", None),
        ];
        let engine = Engine::new(CricketData::new(matches, vec![]).unwrap());
        Client::tracked(rocket(engine, &ServerConfig::default())).unwrap()
    }

    #[test]
    fn test_teams_endpoint() {
        let client = client();
        let response = client.get("/api/teams").dispatch();
        assert_eq!(response.status(), Status::Ok);
        let value: Value = response.into_json().unwrap();
        assert_eq!(value["teams"], serde_json::json!(["Kings", "Royals"]));
    }

    #[test]
    fn test_team_vs_team_endpoint() {
        let client = client();
        let response = client
            .get("/api/team-vs-team?team1=Kings&team2=Royals")
            .dispatch();
        let value: Value = response.into_json().unwrap();
        assert_eq!(value["total"], 2);
        assert_eq!(value["Kings"], 1);
        assert_eq!(value["draws"], 1);
    }

    #[test]
    fn test_team_vs_team_missing_param_is_error_payload() {
        let client = client();
        let response = client.get("/api/team-vs-team?team1=Kings").dispatch();
        let value: Value = response.into_json().unwrap();
        assert_eq!(value["error"], "Invalid team name");
    }

    #[test]
    fn test_unknown_batsman_is_not_an_error() {
        let client = client();
        let response = client.get("/api/batsman?name=Nobody").dispatch();
        assert_eq!(response.status(), Status::Ok);
        let value: Value = response.into_json().unwrap();
        assert_eq!(value["Nobody"]["all"]["runs"], 0);
    }
}
