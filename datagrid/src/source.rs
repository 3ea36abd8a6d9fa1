//! Data sources and the remote fetch contract.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::column::{ColumnDef, Row};
use crate::error::FetchError;
use crate::state::{Direction, Search};

/// Where the grid gets its rows from. Fixed for the grid's lifetime.
#[derive(Clone)]
pub enum DataSource {
    /// A materialized collection; searched, sorted and paged in memory.
    Local(Arc<Vec<Row>>),
    /// A fetch collaborator that does the work on the other side.
    Remote(Arc<dyn FetchData>),
}

impl DataSource {
    pub fn local(rows: Vec<Row>) -> Self {
        Self::Local(Arc::new(rows))
    }

    pub fn remote(fetcher: impl FetchData) -> Self {
        Self::Remote(Arc::new(fetcher))
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Remote(_))
    }
}

impl fmt::Debug for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local(rows) => f.debug_tuple("Local").field(&rows.len()).finish(),
            Self::Remote(_) => f.write_str("Remote(..)"),
        }
    }
}

/// Remote fetch collaborator.
///
/// Implementations must echo the request's `draw` in the response. Any
/// `async fn(FetchRequest) -> Result<FetchResponse, FetchError>` closure
/// implements this trait.
///
/// # Example
///
/// ```ignore
/// struct Server { client: reqwest::Client }
///
/// #[async_trait]
/// impl FetchData for Server {
///     async fn fetch(&self, request: FetchRequest) -> Result<FetchResponse, FetchError> {
///         let resp = self.client.post(URL).json(&request).send().await
///             .map_err(|e| FetchError::new(e.to_string()))?;
///         resp.json().await.map_err(|e| FetchError::new(e.to_string()))
///     }
/// }
/// ```
#[async_trait]
pub trait FetchData: Send + Sync + 'static {
    async fn fetch(&self, request: FetchRequest) -> Result<FetchResponse, FetchError>;
}

#[async_trait]
impl<F, Fut> FetchData for F
where
    F: Fn(FetchRequest) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<FetchResponse, FetchError>> + Send + 'static,
{
    async fn fetch(&self, request: FetchRequest) -> Result<FetchResponse, FetchError> {
        (self)(request).await
    }
}

/// Page length sent to the server; `All` when paging is disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestLength {
    Bounded(usize),
    All,
}

impl RequestLength {
    /// The bound, if any.
    pub fn limit(self) -> Option<usize> {
        match self {
            Self::Bounded(n) => Some(n),
            Self::All => None,
        }
    }
}

impl Serialize for RequestLength {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Bounded(n) => serializer.serialize_u64(*n as u64),
            Self::All => serializer.serialize_i64(-1),
        }
    }
}

/// One sort key as sent to the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OrderRequest {
    pub column: usize,
    #[serde(rename = "dir")]
    pub direction: Direction,
}

/// Column descriptor as sent to the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnDescriptor {
    /// Data path in accessor notation.
    pub data: Option<String>,
    pub name: Option<String>,
    pub orderable: bool,
    pub searchable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<Search>,
}

impl From<&ColumnDef> for ColumnDescriptor {
    fn from(col: &ColumnDef) -> Self {
        Self {
            data: col.data_path().map(ToString::to_string),
            name: col.name().map(str::to_string),
            orderable: col.is_orderable(),
            searchable: col.is_searchable(),
            search: col.column_search().cloned(),
        }
    }
}

/// What the engine asks a remote source for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FetchRequest {
    /// Sequence number; must be echoed in the response.
    pub draw: u64,
    pub start: usize,
    pub length: RequestLength,
    pub search: Search,
    pub order: Vec<OrderRequest>,
    pub columns: Vec<ColumnDescriptor>,
}

/// What a remote source answers with.
///
/// Field names follow the usual server-side processing wire format
/// (`recordsTotal`, `recordsFiltered`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchResponse {
    /// Echo of the request's draw counter.
    pub draw: u64,
    #[serde(default)]
    pub records_total: Option<usize>,
    #[serde(default)]
    pub records_filtered: Option<usize>,
    #[serde(default)]
    pub data: Vec<Row>,
    /// Stored verbatim in the engine state; never interpreted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
}

impl FetchResponse {
    /// Creates a response for `draw` carrying `data`.
    pub fn new(draw: u64, data: Vec<Row>) -> Self {
        Self {
            draw,
            data,
            ..Self::default()
        }
    }

    /// Sets the total and filtered record counts.
    pub fn with_totals(mut self, total: usize, filtered: usize) -> Self {
        self.records_total = Some(total);
        self.records_filtered = Some(filtered);
        self
    }

    /// Attaches an error payload.
    pub fn with_error(mut self, error: impl Into<Value>) -> Self {
        self.error = Some(error.into());
        self
    }
}
