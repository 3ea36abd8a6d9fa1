//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use datagrid::{
    ColumnDef, DataGrid, DataSource, FetchData, FetchError, FetchRequest, FetchResponse,
    GridConfig, GridConfigBuilder, GridError, Row,
};
use serde_json::json;
use tokio::sync::{mpsc, oneshot};

/// `[name, position, office, age]` rows.
pub fn jobs() -> Vec<Row> {
    vec![
        json!(["Tiger Nixon", "System Architect", "Edinburgh", 61]),
        json!(["Garrett Winters", "Accountant", "Tokyo", 63]),
        json!(["Ashton Cox", "Junior Technical Author", "San Francisco", 66]),
        json!(["Cedric Kelly", "Senior Javascript Developer", "Edinburgh", 22]),
        json!(["Airi Satou", "Accountant", "Tokyo", 33]),
        json!(["Brielle Williamson", "Integration Specialist", "New York", 61]),
        json!(["Herrod Chandler", "Sales Assistant", "San Francisco", 59]),
    ]
}

pub fn job_columns() -> Vec<ColumnDef> {
    vec![
        ColumnDef::new("Name").named("name"),
        ColumnDef::new("Position").named("position"),
        ColumnDef::new("Office").named("office"),
        ColumnDef::new("Age").named("age"),
    ]
}

/// `{ "id": i, "name": "Row ii" }` for `i` in `0..count`.
pub fn numbered(count: usize) -> Vec<Row> {
    (0..count)
        .map(|i| json!({ "id": i, "name": format!("Row {i:02}") }))
        .collect()
}

pub fn numbered_columns() -> Vec<ColumnDef> {
    vec![
        ColumnDef::new("Id").data("id").named("id"),
        ColumnDef::new("Name").data("name").named("name"),
    ]
}

/// Ids of the visible rows of a numbered grid.
pub fn ids(grid: &DataGrid) -> Vec<u64> {
    grid.state()
        .data
        .iter()
        .filter_map(|row| row["id"].as_u64())
        .collect()
}

/// Names of the visible rows of a jobs grid.
pub fn names(grid: &DataGrid) -> Vec<String> {
    grid.state()
        .data
        .iter()
        .filter_map(|row| row[0].as_str().map(str::to_string))
        .collect()
}

pub fn key_by_position(row: &Row, index: usize) -> String {
    row.get("id")
        .map_or_else(|| index.to_string(), ToString::to_string)
}

pub fn builder(source: DataSource, columns: Vec<ColumnDef>) -> GridConfigBuilder {
    GridConfig::builder(source, columns).row_key(key_by_position)
}

pub fn local_grid(rows: Vec<Row>, columns: Vec<ColumnDef>) -> DataGrid {
    let config = builder(DataSource::local(rows), columns)
        .build()
        .expect("valid config");
    DataGrid::new(config)
}

/// A pending fetch: the request and the means to answer it.
pub type Pending = (
    FetchRequest,
    oneshot::Sender<Result<FetchResponse, FetchError>>,
);

/// A remote source whose responses are supplied by the test.
pub struct ChannelSource {
    tx: mpsc::UnboundedSender<Pending>,
}

impl ChannelSource {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Pending>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

#[async_trait]
impl FetchData for ChannelSource {
    async fn fetch(&self, request: FetchRequest) -> Result<FetchResponse, FetchError> {
        let (reply, response) = oneshot::channel();
        self.tx
            .send((request, reply))
            .map_err(|_| FetchError::new("test server gone"))?;
        response
            .await
            .map_err(|_| FetchError::new("request dropped"))?
    }
}

/// Errors delivered to the error hook.
#[derive(Clone, Default)]
pub struct ErrorLog(Arc<Mutex<Vec<String>>>);

impl ErrorLog {
    pub fn hook(&self) -> impl Fn(&GridError) + Send + Sync + 'static {
        let log = Arc::clone(&self.0);
        move |err: &GridError| log.lock().unwrap().push(err.to_string())
    }

    pub fn messages(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

/// Rows `start..start + len` of a numbered collection, tagged with `tag`.
pub fn page_rows(start: usize, len: usize, tag: &str) -> Vec<Row> {
    (start..start + len)
        .map(|i| json!({ "id": i, "name": format!("{tag} {i}") }))
        .collect()
}
