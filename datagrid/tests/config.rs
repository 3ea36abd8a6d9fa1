mod common;

use std::time::Duration;

use common::{builder, job_columns, jobs};
use datagrid::{
    ConfigError, DataGrid, DataSource, GridConfig, OrderEntry, OrderSpec, Search, Settings,
};

#[test]
fn test_row_key_is_required() {
    let result = GridConfig::builder(DataSource::local(jobs()), job_columns()).build();
    assert!(matches!(result, Err(ConfigError::MissingRowKey)));
}

#[test]
fn test_defaults() {
    let config = builder(DataSource::local(jobs()), job_columns())
        .build()
        .unwrap();
    let settings = config.settings();
    assert_eq!(settings.page_length, 10);
    assert_eq!(settings.length_menu, vec![10, 25, 50, 100]);
    assert_eq!(settings.search_delay(), Duration::from_millis(400));
    assert!(settings.paging);
    assert!(settings.multi_sort);
    assert!(!config.is_remote());
}

#[test]
fn test_page_length_joins_menu() {
    let config = builder(DataSource::local(jobs()), job_columns())
        .page_length(15)
        .build()
        .unwrap();
    assert_eq!(config.settings().length_menu, vec![10, 15, 25, 50, 100]);
}

#[test]
fn test_invalid_lengths_rejected() {
    let empty = builder(DataSource::local(jobs()), job_columns())
        .length_menu(Vec::new())
        .build();
    assert!(matches!(empty, Err(ConfigError::EmptyLengthMenu)));

    let zero = builder(DataSource::local(jobs()), job_columns())
        .page_length(0)
        .build();
    assert!(matches!(zero, Err(ConfigError::ZeroLength)));
}

#[test]
fn test_initial_order_by_name() {
    let config = builder(DataSource::local(jobs()), job_columns())
        .order(OrderSpec::desc("age"))
        .order(OrderSpec::asc("name"))
        .build()
        .unwrap();
    assert_eq!(config.order(), &[OrderEntry::desc(3), OrderEntry::asc(0)]);

    let unknown = builder(DataSource::local(jobs()), job_columns())
        .order(OrderSpec::asc("salary"))
        .build();
    assert!(matches!(unknown, Err(ConfigError::UnknownColumn(_))));
}

#[test]
fn test_settings_from_json() {
    let settings = Settings::from_json(
        r#"{
            "page_length": 25,
            "search_delay_ms": 150,
            "multi_sort": false,
            "initial_search": { "value": "tokyo", "regex": false }
        }"#,
    )
    .unwrap();
    assert_eq!(settings.page_length, 25);
    assert_eq!(settings.length_menu, vec![10, 25, 50, 100]);
    assert_eq!(settings.search_delay(), Duration::from_millis(150));
    assert!(settings.paging);
    assert!(!settings.multi_sort);
    assert_eq!(settings.initial_search, Search::text("tokyo"));

    assert!(matches!(
        Settings::from_json("{ \"page_length\": \"ten\" }"),
        Err(ConfigError::Settings(_))
    ));
}

#[tokio::test]
async fn test_initial_state_follows_config() {
    let settings = Settings {
        page_length: 25,
        initial_search: Search::text("edinburgh"),
        ..Settings::default()
    };
    let config = builder(DataSource::local(jobs()), job_columns())
        .settings(settings)
        .order(OrderSpec::desc(3usize))
        .build()
        .unwrap();
    let mut grid = DataGrid::new(config);

    let state = grid.state();
    assert_eq!(state.length, 25);
    assert_eq!(state.search.value, "edinburgh");
    assert_eq!(state.order, vec![OrderEntry::desc(3)]);

    grid.mount().await.unwrap();
    assert_eq!(grid.state().records_filtered, Some(2));
    assert_eq!(grid.state().data[0][0], "Tiger Nixon");
}

#[tokio::test]
async fn test_multi_sort_can_be_disabled() {
    let config = builder(DataSource::local(jobs()), job_columns())
        .multi_sort(false)
        .build()
        .unwrap();
    let mut grid = DataGrid::new(config);
    grid.mount().await.unwrap();

    grid.engine().sort_column(0, true).unwrap().await.unwrap();
    grid.engine().sort_column(1, true).unwrap().await.unwrap();
    assert_eq!(grid.state().order, vec![OrderEntry::asc(1)]);
}
