//! Integration tests for the game repositories and the PostgreSQL catalog.
//!
//! Exercises the repository layer against a real database:
//! - Create with device associations, details lookup
//! - Search filtering on game and category names, LIKE escaping
//! - Pagination windows and ordering
//! - Update / delete of missing rows leaving the store unchanged
//! - Foreign key violations

use gamezone_core::pagination::PageRequest;
use gamezone_core::search::{MatchMode, SearchFilter};
use gamezone_core::types::DbId;
use gamezone_db::catalog::{self, GameReader, PgCatalog, SelectListSource};
use gamezone_db::models::game::{CreateGame, UpdateGame};
use gamezone_db::repositories::{CategoryRepo, DeviceRepo, GameRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn category_id(pool: &PgPool, name: &str) -> DbId {
    sqlx::query_scalar("SELECT id FROM categories WHERE name = $1")
        .bind(name)
        .fetch_one(pool)
        .await
        .unwrap()
}

async fn device_id(pool: &PgPool, name: &str) -> DbId {
    sqlx::query_scalar("SELECT id FROM devices WHERE name = $1")
        .bind(name)
        .fetch_one(pool)
        .await
        .unwrap()
}

fn new_game(name: &str, category_id: DbId, device_ids: Vec<DbId>) -> CreateGame {
    CreateGame {
        name: name.to_string(),
        description: format!("{name} description"),
        category_id,
        cover: format!("{}.png", name.to_lowercase().replace(' ', "-")),
        device_ids,
    }
}

fn all() -> SearchFilter {
    SearchFilter::all(MatchMode::CaseInsensitive)
}

/// Seven games: three Sports, two Racing, two Action.
async fn seed(pool: &PgPool) -> Vec<DbId> {
    let sports = category_id(pool, "Sports").await;
    let racing = category_id(pool, "Racing").await;
    let action = category_id(pool, "Action").await;
    let ps = device_id(pool, "PlayStation").await;
    let pc = device_id(pool, "PC").await;

    let games = [
        new_game("FIFA 24", sports, vec![ps, pc]),
        new_game("NBA 2K24", sports, vec![ps]),
        new_game("PGA Tour", sports, vec![pc]),
        new_game("Forza Horizon 5", racing, vec![pc]),
        new_game("Gran Turismo 7", racing, vec![ps]),
        new_game("God of War", action, vec![ps]),
        new_game("Halo Infinite", action, vec![pc]),
    ];

    let mut ids = Vec::new();
    for game in &games {
        ids.push(GameRepo::create(pool, game).await.unwrap().id);
    }
    ids
}

// ---------------------------------------------------------------------------
// Seed data
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_seeded_lookups(pool: PgPool) {
    let categories = CategoryRepo::list(&pool).await.unwrap();
    assert_eq!(categories.len(), 6);

    let devices = DeviceRepo::list(&pool).await.unwrap();
    assert_eq!(devices.len(), 4);

    let store = PgCatalog::new(pool);
    let items = store.category_items().await.unwrap();
    assert_eq!(items.first().map(|i| i.text.as_str()), Some("Action"));
    assert_eq!(store.device_items().await.unwrap().len(), 4);
}

// ---------------------------------------------------------------------------
// Create / details
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_with_devices(pool: PgPool) {
    let sports = category_id(&pool, "Sports").await;
    let ps = device_id(&pool, "PlayStation").await;
    let xbox = device_id(&pool, "Xbox").await;

    let game = GameRepo::create(&pool, &new_game("FIFA 24", sports, vec![xbox, ps]))
        .await
        .unwrap();
    assert_eq!(game.name, "FIFA 24");
    assert_eq!(game.cover, "fifa-24.png");

    let mut expected = vec![ps, xbox];
    expected.sort_unstable();
    assert_eq!(GameRepo::device_ids(&pool, game.id).await.unwrap(), expected);

    let details = GameRepo::find_details(&pool, game.id).await.unwrap().unwrap();
    assert_eq!(details.category_name.as_deref(), Some("Sports"));
    assert_eq!(details.device_ids(), expected);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_find_details_missing(pool: PgPool) {
    assert!(GameRepo::find_details(&pool, 424_242).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_with_unknown_category_fails(pool: PgPool) {
    let result = GameRepo::create(&pool, &new_game("Ghost", 999_999, vec![])).await;
    let err = result.unwrap_err();
    let db_err = err.as_database_error().expect("should be a database error");
    assert_eq!(db_err.code().as_deref(), Some("23503"));

    assert_eq!(GameRepo::count(&pool).await.unwrap(), 0);
}

// ---------------------------------------------------------------------------
// Search + pagination
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_paginates_seven_into_five_and_two(pool: PgPool) {
    let ids = seed(&pool).await;
    let store = PgCatalog::new(pool);

    let first = catalog::list_page(&store, &all(), PageRequest::new(Some(1), Some(5)))
        .await
        .unwrap();
    assert_eq!(first.games.len(), 5);
    assert_eq!(first.pagination.total_pages, 2);
    assert_eq!(first.records_total, 7);

    let second = catalog::list_page(&store, &all(), PageRequest::new(Some(2), Some(5)))
        .await
        .unwrap();
    let second_ids: Vec<DbId> = second.games.iter().map(|g| g.id).collect();
    assert_eq!(second_ids, ids[5..].to_vec());

    let third = catalog::list_page(&store, &all(), PageRequest::new(Some(3), Some(5)))
        .await
        .unwrap();
    assert!(third.games.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_includes_category_and_devices(pool: PgPool) {
    seed(&pool).await;
    let ps = device_id(&pool, "PlayStation").await;
    let pc = device_id(&pool, "PC").await;

    let games = GameRepo::list_matching(&pool, &all(), None).await.unwrap();
    let fifa = games.iter().find(|g| g.name == "FIFA 24").unwrap();
    assert_eq!(fifa.category_name.as_deref(), Some("Sports"));

    let mut expected = vec![ps, pc];
    expected.sort_unstable();
    assert_eq!(fifa.device_ids, expected);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_search_by_name_and_category(pool: PgPool) {
    seed(&pool).await;

    let by_category = SearchFilter::new(Some("racing"), MatchMode::CaseInsensitive);
    let racing = GameRepo::list_matching(&pool, &by_category, None).await.unwrap();
    let names: Vec<&str> = racing.iter().map(|g| g.name.as_str()).collect();
    assert_eq!(names, vec!["Forza Horizon 5", "Gran Turismo 7"]);

    let by_name = SearchFilter::new(Some("2K"), MatchMode::CaseInsensitive);
    assert_eq!(GameRepo::count_matching(&pool, &by_name).await.unwrap(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_search_case_modes(pool: PgPool) {
    seed(&pool).await;

    let sensitive = SearchFilter::new(Some("halo"), MatchMode::CaseSensitive);
    assert_eq!(GameRepo::count_matching(&pool, &sensitive).await.unwrap(), 0);

    let insensitive = SearchFilter::new(Some("halo"), MatchMode::CaseInsensitive);
    assert_eq!(GameRepo::count_matching(&pool, &insensitive).await.unwrap(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_search_treats_wildcards_literally(pool: PgPool) {
    seed(&pool).await;

    let percent = SearchFilter::new(Some("%"), MatchMode::CaseInsensitive);
    assert_eq!(GameRepo::count_matching(&pool, &percent).await.unwrap(), 0);

    let underscore = SearchFilter::new(Some("_"), MatchMode::CaseInsensitive);
    assert_eq!(GameRepo::count_matching(&pool, &underscore).await.unwrap(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_search_without_matches(pool: PgPool) {
    seed(&pool).await;
    let store = PgCatalog::new(pool);

    let none = SearchFilter::new(Some("zelda"), MatchMode::CaseInsensitive);
    let page = catalog::list_page(&store, &none, PageRequest::default())
        .await
        .unwrap();
    assert!(page.games.is_empty());
    assert_eq!(page.pagination.total_pages, 0);
    assert_eq!(page.records_filtered, 0);
    assert_eq!(page.records_total, 7);

    let bytes = catalog::export_workbook(&store, &none).await.unwrap();
    assert!(bytes.starts_with(b"PK"));
}

// ---------------------------------------------------------------------------
// Update / delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_replaces_fields_and_devices(pool: PgPool) {
    let ids = seed(&pool).await;
    let action = category_id(&pool, "Action").await;
    let xbox = device_id(&pool, "Xbox").await;

    let input = UpdateGame {
        name: "FIFA 25".into(),
        description: "New season".into(),
        category_id: action,
        cover: None,
        device_ids: vec![xbox],
    };
    let updated = GameRepo::update(&pool, ids[0], &input).await.unwrap().unwrap();

    assert_eq!(updated.name, "FIFA 25");
    assert_eq!(updated.category_id, action);
    assert_eq!(updated.cover, "fifa-24.png", "cover kept when not replaced");
    assert!(updated.updated_at >= updated.created_at);
    assert_eq!(GameRepo::device_ids(&pool, ids[0]).await.unwrap(), vec![xbox]);

    let with_cover = UpdateGame {
        cover: Some("new-cover.jpg".into()),
        ..input
    };
    let updated = GameRepo::update(&pool, ids[0], &with_cover).await.unwrap().unwrap();
    assert_eq!(updated.cover, "new-cover.jpg");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_missing_game_changes_nothing(pool: PgPool) {
    let ids = seed(&pool).await;
    let sports = category_id(&pool, "Sports").await;
    let before = GameRepo::list_matching(&pool, &all(), None).await.unwrap();

    let input = UpdateGame {
        name: "Ghost".into(),
        description: String::new(),
        category_id: sports,
        cover: None,
        device_ids: vec![],
    };
    let missing = ids.iter().max().unwrap() + 1_000;
    assert!(GameRepo::update(&pool, missing, &input).await.unwrap().is_none());

    let after = GameRepo::list_matching(&pool, &all(), None).await.unwrap();
    assert_eq!(before, after);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_cascades_associations(pool: PgPool) {
    let ids = seed(&pool).await;

    let deleted = GameRepo::delete(&pool, ids[0]).await.unwrap().unwrap();
    assert_eq!(deleted.name, "FIFA 24");

    assert!(GameRepo::find_by_id(&pool, ids[0]).await.unwrap().is_none());
    assert!(GameRepo::device_ids(&pool, ids[0]).await.unwrap().is_empty());
    assert_eq!(GameRepo::count(&pool).await.unwrap(), 6);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_missing_game_changes_nothing(pool: PgPool) {
    seed(&pool).await;

    assert!(GameRepo::delete(&pool, 999_999).await.unwrap().is_none());
    assert_eq!(GameRepo::count(&pool).await.unwrap(), 7);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_catalog_find_game(pool: PgPool) {
    let ids = seed(&pool).await;
    let store = PgCatalog::new(pool);

    let details = store.find_game(ids[6]).await.unwrap().unwrap();
    assert_eq!(details.game.name, "Halo Infinite");
    assert_eq!(details.category_name.as_deref(), Some("Action"));
    assert_eq!(details.devices.len(), 1);
    assert_eq!(details.devices[0].name, "PC");
}
