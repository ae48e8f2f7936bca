use planet_core::db::migrations::latest_version;
use planet_core::db::open_db_in_memory;
use planet_core::{
    build_filter, ErrorKind, Planet, PlanetRepository, PlanetValidationError, RepoError,
    SqlitePlanetRepository,
};
use rusqlite::Connection;

#[test]
fn save_assigns_id_and_keeps_fields() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePlanetRepository::try_new(&conn).unwrap();

    let planet = Planet::new("name", "climate", "terrain");
    let stored = repo.save(&planet).unwrap();

    let id = stored.id().expect("saved planet should have an id");
    assert_eq!(stored.name, planet.name);
    assert_eq!(stored.climate, planet.climate);
    assert_eq!(stored.terrain, planet.terrain);
    assert_eq!(planet.id(), None);

    let loaded = repo.find_by_id(id).unwrap().unwrap();
    assert_eq!(loaded, stored);
}

#[test]
fn save_rejects_empty_fields() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePlanetRepository::try_new(&conn).unwrap();

    let cases = [
        (Planet::new("", "climate", "terrain"), PlanetValidationError::EmptyName),
        (Planet::new("name", "", "terrain"), PlanetValidationError::EmptyClimate),
        (Planet::new("name", "climate", ""), PlanetValidationError::EmptyTerrain),
        (Planet::new("", "", "terrain"), PlanetValidationError::EmptyName),
        (Planet::new("name", "", ""), PlanetValidationError::EmptyClimate),
        (Planet::new("", "", ""), PlanetValidationError::EmptyName),
        (Planet::new(" ", "climate", "terrain"), PlanetValidationError::EmptyName),
    ];

    for (planet, expected) in cases {
        let err = repo.save(&planet).unwrap_err();
        assert!(
            matches!(err, RepoError::Validation(actual) if actual == expected),
            "unexpected error for {planet:?}: {err}"
        );
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    assert!(repo.find_by_filter(&build_filter(None, None)).unwrap().is_empty());
}

#[test]
fn save_with_existing_name_is_a_conflict() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePlanetRepository::try_new(&conn).unwrap();

    repo.save(&Planet::new("Hoth", "frozen", "tundra")).unwrap();
    let err = repo
        .save(&Planet::new("Hoth", "temperate", "grass"))
        .unwrap_err();

    assert!(matches!(err, RepoError::DuplicateName(ref name) if name == "Hoth"));
    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert_eq!(repo.find_by_filter(&build_filter(None, None)).unwrap().len(), 1);
}

#[test]
fn save_with_existing_explicit_id_is_a_conflict() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePlanetRepository::try_new(&conn).unwrap();

    let first = Planet::with_id(10, "Hoth", "frozen", "tundra").unwrap();
    assert_eq!(repo.save(&first).unwrap().id(), Some(10));

    let second = Planet::with_id(10, "Endor", "temperate", "forest").unwrap();
    let err = repo.save(&second).unwrap_err();
    assert!(matches!(err, RepoError::DuplicateId(10)));
}

#[test]
fn find_by_name_is_exact() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePlanetRepository::try_new(&conn).unwrap();

    let stored = repo.save(&Planet::new("Tatooine", "arid", "desert")).unwrap();

    assert_eq!(repo.find_by_name("Tatooine").unwrap(), Some(stored));
    assert_eq!(repo.find_by_name("tatooine").unwrap(), None);
    assert_eq!(repo.find_by_name("Tatoo").unwrap(), None);
}

#[test]
fn find_by_id_returns_none_for_missing_planet() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePlanetRepository::try_new(&conn).unwrap();

    assert!(repo.find_by_id(1).unwrap().is_none());
}

#[test]
fn delete_removes_row_and_reports_missing_ids() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePlanetRepository::try_new(&conn).unwrap();

    let id = repo
        .save(&Planet::new("Alderaan", "temperate", "grass"))
        .unwrap()
        .id()
        .unwrap();

    repo.delete_by_id(id).unwrap();
    assert!(repo.find_by_id(id).unwrap().is_none());

    let err = repo.delete_by_id(id).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(missing) if missing == id));
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn name_is_reusable_after_delete() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePlanetRepository::try_new(&conn).unwrap();

    let id = repo
        .save(&Planet::new("Hoth", "frozen", "tundra"))
        .unwrap()
        .id()
        .unwrap();
    repo.delete_by_id(id).unwrap();

    let again = repo.save(&Planet::new("Hoth", "frozen", "tundra")).unwrap();
    assert_ne!(again.id(), Some(id));
}

#[test]
fn filter_matches_case_insensitive_substrings_in_sql() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePlanetRepository::try_new(&conn).unwrap();

    let tatooine = repo.save(&Planet::new("Tatooine", "arid", "desert")).unwrap();
    repo.save(&Planet::new("Alderaan", "temperate", "grass")).unwrap();

    let by_climate = repo.find_by_filter(&build_filter(Some("ARI"), None)).unwrap();
    assert_eq!(by_climate, vec![tatooine.clone()]);

    let by_terrain = repo.find_by_filter(&build_filter(None, Some("Sert"))).unwrap();
    assert_eq!(by_terrain, vec![tatooine]);

    let nothing = repo.find_by_filter(&build_filter(Some("frozen"), None)).unwrap();
    assert!(nothing.is_empty());
}

#[test]
fn filter_folds_non_ascii_case_in_sql() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePlanetRepository::try_new(&conn).unwrap();

    let aero = repo.save(&Planet::new("Ærø", "ÁRIDO", "ÉRG")).unwrap();

    let by_climate = repo.find_by_filter(&build_filter(Some("árido"), None)).unwrap();
    assert_eq!(by_climate, vec![aero.clone()]);

    let by_terrain = repo.find_by_filter(&build_filter(None, Some("érg"))).unwrap();
    assert_eq!(by_terrain, vec![aero]);
}

#[test]
fn filter_value_with_like_wildcards_is_literal() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePlanetRepository::try_new(&conn).unwrap();

    repo.save(&Planet::new("Tatooine", "arid", "desert")).unwrap();

    assert!(repo
        .find_by_filter(&build_filter(Some("%"), None))
        .unwrap()
        .is_empty());
    assert!(repo
        .find_by_filter(&build_filter(Some("a_id"), None))
        .unwrap()
        .is_empty());
}

#[test]
fn explicit_empty_filter_value_matches_nothing() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePlanetRepository::try_new(&conn).unwrap();

    repo.save(&Planet::new("Tatooine", "arid", "desert")).unwrap();

    assert!(repo
        .find_by_filter(&build_filter(Some(""), None))
        .unwrap()
        .is_empty());
    assert_eq!(repo.find_by_filter(&build_filter(None, None)).unwrap().len(), 1);
}

#[test]
fn sql_and_in_memory_filters_agree() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePlanetRepository::try_new(&conn).unwrap();

    for planet in [
        Planet::new("Tatooine", "arid", "desert"),
        Planet::new("Alderaan", "temperate", "grass"),
        Planet::new("Yaviniv", "temperate", "tropical"),
        Planet::new("Hoth", "Frozen", "Tundra, Ice Caves"),
        Planet::new("Ærø", "ÁRIDO", "ÉRG"),
    ] {
        repo.save(&planet).unwrap();
    }
    let all = repo.find_by_filter(&build_filter(None, None)).unwrap();

    let values = [
        None,
        Some(""),
        Some("a"),
        Some("TEMP"),
        Some("ice"),
        Some("zz"),
        Some("árido"),
        Some("Érg"),
    ];
    for climate in values {
        for terrain in values {
            let filter = build_filter(climate, terrain);
            let expected: Vec<_> = all
                .iter()
                .filter(|planet| filter.matches(planet))
                .cloned()
                .collect();
            assert_eq!(
                repo.find_by_filter(&filter).unwrap(),
                expected,
                "climate={climate:?} terrain={terrain:?}"
            );
        }
    }
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match SqlitePlanetRepository::try_new(&conn) {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert_eq!(expected_version, latest_version()),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_connection_without_planets_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqlitePlanetRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredTable("planets"))
    ));
}

#[test]
fn repository_rejects_connection_missing_terrain_column() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE planets (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            climate TEXT NOT NULL
        );",
    )
    .unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqlitePlanetRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredColumn {
            table: "planets",
            column: "terrain"
        })
    ));
}

#[test]
fn invalid_persisted_rows_are_reported() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE planets (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            climate TEXT NOT NULL,
            terrain TEXT NOT NULL
        );
        INSERT INTO planets (id, name, climate, terrain) VALUES (1, 'Ghost', '', 'void');",
    )
    .unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let repo = SqlitePlanetRepository::try_new(&conn).unwrap();
    let err = repo.find_by_id(1).unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
    assert_eq!(err.kind(), ErrorKind::Storage);
}
