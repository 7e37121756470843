use dailyquote_core::{
    CoreConfig, DiaryService, FavoriteService, QuoteRepository, QuoteService, RepoError,
    SeedPolicy, ServiceError, SqliteStore, Store,
};
use std::sync::{Arc, Barrier};

#[test]
fn file_store_persists_across_reopen_without_reseeding() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("daily_quote.db");

    let first_ids: Vec<i64> = {
        let store = SqliteStore::open(&path, SeedPolicy::IfEmpty).unwrap();
        DiaryService::new(&store)
            .add_diary_entry("2024-01-01", "new year")
            .unwrap();
        store
            .list_quotes()
            .unwrap()
            .into_iter()
            .map(|quote| quote.id)
            .collect()
    };

    let store = SqliteStore::open(&path, SeedPolicy::IfEmpty).unwrap();
    let second_ids: Vec<i64> = store
        .list_quotes()
        .unwrap()
        .into_iter()
        .map(|quote| quote.id)
        .collect();
    assert_eq!(first_ids, second_ids);
    assert_eq!(
        DiaryService::new(&store)
            .diary_entries("2024-01-01")
            .unwrap()
            .entries,
        vec!["new year".to_string()]
    );
}

#[test]
fn always_policy_duplicates_seed_on_each_open() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("daily_quote.db");

    drop(SqliteStore::open(&path, SeedPolicy::Always).unwrap());
    let store = SqliteStore::open(&path, SeedPolicy::Always).unwrap();

    assert_eq!(store.count_quotes(None).unwrap(), 70);
    assert_eq!(store.count_quotes(Some("Wisdom")).unwrap(), 14);
}

#[test]
fn initialize_reports_inserted_rows() {
    let store = SqliteStore::open_in_memory(SeedPolicy::IfEmpty).unwrap();

    assert_eq!(store.initialize(SeedPolicy::IfEmpty).unwrap(), 0);
    assert_eq!(store.initialize(SeedPolicy::Always).unwrap(), 35);
    assert_eq!(store.count_quotes(None).unwrap(), 70);
}

#[test]
fn from_config_opens_configured_path() {
    let dir = tempfile::tempdir().unwrap();
    let config = CoreConfig {
        db_path: dir.path().join("configured.db"),
        ..CoreConfig::default()
    };

    let store = SqliteStore::from_config(&config).unwrap();
    assert_eq!(store.count_quotes(None).unwrap(), 35);
    assert!(config.db_path.exists());
}

#[test]
fn one_store_serves_every_handler() {
    let store = SqliteStore::open_in_memory(SeedPolicy::IfEmpty).unwrap();
    exercise_all(&store);
}

#[test]
fn store_is_shareable_across_threads() {
    let store = Arc::new(SqliteStore::open_in_memory(SeedPolicy::IfEmpty).unwrap());

    let handles: Vec<_> = (0..4)
        .map(|worker| {
            let store = Arc::clone(&store);
            std::thread::spawn(move || {
                let diary = DiaryService::new(&*store);
                diary
                    .add_diary_entry("2024-05-05", &format!("worker {worker}"))
                    .unwrap();
                QuoteService::new(&*store).daily_quote(None).unwrap();
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let entries = DiaryService::new(&*store)
        .diary_entries("2024-05-05")
        .unwrap()
        .entries;
    assert_eq!(entries.len(), 4);
}

#[test]
fn concurrent_opens_of_fresh_file_seed_exactly_once() {
    const WORKERS: usize = 4;

    for round in 0..5 {
        let dir = tempfile::tempdir().unwrap();
        let path = Arc::new(dir.path().join(format!("shared_{round}.db")));
        let barrier = Arc::new(Barrier::new(WORKERS));

        let handles: Vec<_> = (0..WORKERS)
            .map(|_| {
                let path = Arc::clone(&path);
                let barrier = Arc::clone(&barrier);
                std::thread::spawn(move || {
                    barrier.wait();
                    SqliteStore::open(&*path, SeedPolicy::IfEmpty).map(|_| ())
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap().unwrap();
        }

        let store = SqliteStore::open(&*path, SeedPolicy::IfEmpty).unwrap();
        assert_eq!(store.count_quotes(None).unwrap(), 35, "round {round}");
    }
}

#[test]
fn failing_statement_surfaces_as_store_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("daily_quote.db");
    let store = SqliteStore::open(&path, SeedPolicy::IfEmpty).unwrap();

    rusqlite::Connection::open(&path)
        .unwrap()
        .execute_batch("DROP TABLE quotes;")
        .unwrap();

    let err = QuoteService::new(&store).daily_quote(None).unwrap_err();
    assert_eq!(err.kind(), "store_unavailable");
    assert!(matches!(
        err,
        ServiceError::StoreUnavailable(RepoError::Db(_))
    ));
}

fn exercise_all<S: Store>(store: &S) {
    let quotes = QuoteService::new(store);
    let favorites = FavoriteService::new(store);
    let diary = DiaryService::new(store);

    let quote = quotes.daily_quote(None).unwrap().quote;
    favorites.add_favorite(quote.id, "Mix").unwrap();
    assert_eq!(
        favorites.favorites_by_category("Mix").unwrap().favorites[0].id,
        quote.id
    );
    diary.add_diary_entry("2024-02-02", "groundhog").unwrap();
    assert_eq!(diary.diary_entries("2024-02-02").unwrap().entries.len(), 1);
}
