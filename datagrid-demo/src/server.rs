//! A simulated slow server for remote mode.

use std::time::Duration;

use async_trait::async_trait;
use datagrid::{
    ColumnDef, FetchData, FetchError, FetchRequest, FetchResponse, OrderEntry, Row, process_local,
};

/// Answers fetch requests from an in-memory table after an artificial delay.
///
/// The delay shrinks as draws increase, so rapid interactions produce
/// responses that arrive out of order.
pub struct SlowServer {
    rows: Vec<Row>,
    columns: Vec<ColumnDef>,
    latency: Duration,
}

impl SlowServer {
    pub fn new(rows: Vec<Row>, columns: Vec<ColumnDef>, latency: Duration) -> Self {
        Self {
            rows,
            columns,
            latency,
        }
    }

    fn delay_for(&self, draw: u64) -> Duration {
        let step = 3 - (draw % 3) as u32;
        self.latency * step
    }
}

#[async_trait]
impl FetchData for SlowServer {
    async fn fetch(&self, request: FetchRequest) -> Result<FetchResponse, FetchError> {
        let delay = self.delay_for(request.draw);
        log::debug!("server: draw {} answers in {delay:?}", request.draw);
        tokio::time::sleep(delay).await;

        let order: Vec<OrderEntry> = request
            .order
            .iter()
            .map(|o| OrderEntry {
                column: o.column,
                direction: o.direction,
            })
            .collect();
        let matched = process_local(&self.rows, &self.columns, &request.search, &order);
        let filtered = matched.len();
        let page: Vec<Row> = matched
            .into_iter()
            .skip(request.start)
            .take(request.length.limit().unwrap_or(usize::MAX))
            .cloned()
            .collect();

        Ok(FetchResponse::new(request.draw, page).with_totals(self.rows.len(), filtered))
    }
}
