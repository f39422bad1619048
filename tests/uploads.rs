// End-to-end upload pipeline: validation, duplicate rejection and roster
// merging against an in-memory database.

mod common;

use common::{memory_pool, read_fixture};
use ootp_tournament_stats::config::AppConfig;
use ootp_tournament_stats::database::{self, DbPool, TournamentRecord};
use ootp_tournament_stats::errors::{AuthError, UploadError};
use ootp_tournament_stats::services::UploadService;
use ootp_tournament_stats::session::Session;
use ootp_tournament_stats::stats::StatKind;

fn setup() -> (DbPool, UploadService, i64) {
    let pool = memory_pool();
    let tournament = {
        let mut conn = database::get_connection(&pool).unwrap();
        database::tournaments::insert_tournament(&mut conn, "Summer Cup").unwrap()
    };
    let service = UploadService::new(pool.clone(), &AppConfig::default());
    (pool, service, tournament.id)
}

fn load(pool: &DbPool, id: i64) -> TournamentRecord {
    let mut conn = database::get_connection(pool).unwrap();
    database::tournaments::find_by_id(&mut conn, id).unwrap().unwrap()
}

#[test]
fn second_pitching_upload_merges_by_name() {
    let (pool, service, id) = setup();
    let operator = Session::local_operator();

    let first = service
        .ingest(&operator, id, "week1.csv", read_fixture("pitching_week1.csv").as_bytes())
        .unwrap();
    assert_eq!(first.kind, StatKind::Pitching);
    assert_eq!((first.players_added, first.players_updated), (2, 0));

    let second = service
        .ingest(&operator, id, "week2.csv", read_fixture("pitching_week2.csv").as_bytes())
        .unwrap();
    // the trailing unnamed row is dropped
    assert_eq!(second.rows_accepted, 2);
    assert_eq!((second.players_added, second.players_updated), (1, 1));

    let stored = load(&pool, id);
    let names: Vec<&str> = stored.pitching.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Ace", "Closer", "Rookie"]);

    let ace = &stored.pitching[0];
    assert_eq!(ace.ip.to_string(), "12.0");
    assert_eq!((ace.g, ace.gs, ace.bf), (2, 2, 49));
    assert_eq!(ace.era, "4.50");
    assert_eq!(ace.war, "0.4");
    assert_eq!(ace.ovr, 79);
    assert_eq!(stored.file_hashes.len(), 2);
    assert!(stored.batting.is_empty());
}

#[test]
fn batting_merge_recomputes_ratios_from_counts() {
    let (pool, service, id) = setup();
    let operator = Session::local_operator();

    service
        .ingest(&operator, id, "b1.csv", read_fixture("batting_week1.csv").as_bytes())
        .unwrap();
    service
        .ingest(&operator, id, "b2.csv", read_fixture("batting_week2.csv").as_bytes())
        .unwrap();

    let stored = load(&pool, id);
    let smith = stored.batting.iter().find(|b| b.name == "Smith").unwrap();
    assert_eq!((smith.ab, smith.h), (20, 8));
    assert_eq!(smith.avg, ".400");
    assert_eq!(smith.slg, ".600");
    assert_eq!(smith.war, "0.5");
}

#[test]
fn duplicate_file_is_rejected_without_touching_roster() {
    let (pool, service, id) = setup();
    let operator = Session::local_operator();
    let csv = read_fixture("pitching_week1.csv");

    service.ingest(&operator, id, "week1.csv", csv.as_bytes()).unwrap();
    let before = load(&pool, id);

    let again = service.ingest(&operator, id, "renamed.csv", csv.as_bytes());
    assert!(matches!(again, Err(UploadError::DuplicateFile)));

    let after = load(&pool, id);
    assert_eq!(after.pitching, before.pitching);
    assert_eq!(after.file_hashes, before.file_hashes);
}

#[test]
fn unauthorized_session_changes_nothing() {
    let (pool, service, id) = setup();

    let result = service.ingest(
        &Session::anonymous(),
        id,
        "week1.csv",
        read_fixture("pitching_week1.csv").as_bytes(),
    );
    assert!(matches!(
        result,
        Err(UploadError::Unauthorized(AuthError::MissingPassword))
    ));
    assert!(load(&pool, id).pitching.is_empty());
}

#[test]
fn unknown_tournament_is_reported() {
    let (_pool, service, _id) = setup();

    let result = service.ingest(
        &Session::local_operator(),
        404,
        "week1.csv",
        read_fixture("pitching_week1.csv").as_bytes(),
    );
    assert!(matches!(result, Err(UploadError::TournamentNotFound(404))));
}
