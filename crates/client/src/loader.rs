//! Sequenced period report loading.
//!
//! When the user switches periods quickly, responses can arrive out of
//! order. Each load takes a ticket and a response is only delivered if no
//! newer load has started since.

use std::future::Future;

use tracing::debug;

use crate::client::FinancialClient;
use crate::error::ClientError;
use nepfin_core::aggregation::PeriodReport;
use nepfin_core::period::Period;
use nepfin_core::sequence::RequestSequencer;

/// Source of period reports.
pub trait ReportSource {
    /// Fetches the report for `period`.
    fn fetch_period_report(
        &self,
        period: &Period,
    ) -> impl Future<Output = Result<PeriodReport, ClientError>> + Send;
}

impl ReportSource for FinancialClient {
    async fn fetch_period_report(&self, period: &Period) -> Result<PeriodReport, ClientError> {
        self.period_report(period).await
    }
}

/// Loads period reports, discarding responses superseded by a newer load.
#[derive(Debug)]
pub struct PeriodReportLoader<S> {
    source: S,
    sequencer: RequestSequencer,
}

impl<S: ReportSource> PeriodReportLoader<S> {
    /// Creates a loader over `source`.
    pub const fn new(source: S) -> Self {
        Self {
            source,
            sequencer: RequestSequencer::new(),
        }
    }

    /// Loads the report for `period`.
    ///
    /// Returns `Ok(None)` when a newer load started before this one
    /// finished. Errors of stale loads are dropped the same way.
    pub async fn load(&self, period: &Period) -> Result<Option<PeriodReport>, ClientError> {
        let ticket = self.sequencer.begin();
        let result = self.source.fetch_period_report(period).await;

        if !self.sequencer.is_current(ticket) {
            debug!(ticket = ticket.value(), period = %period.label(), "Discarding stale response");
            return Ok(None);
        }

        result.map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nepfin_core::aggregation::{
        BalanceSheetAggregate, BalanceSheetTotals, IncomeStatementAggregate,
    };
    use tokio::sync::Notify;

    /// Serves 2023 only after a later request has completed.
    struct SlowPriorYear {
        released: Notify,
    }

    impl ReportSource for SlowPriorYear {
        async fn fetch_period_report(&self, period: &Period) -> Result<PeriodReport, ClientError> {
            if period.year() == 2023 {
                self.released.notified().await;
            } else {
                self.released.notify_one();
            }
            if period.year() == 1999 {
                return Err(ClientError::Api {
                    status: 400,
                    message: "bad".into(),
                });
            }
            Ok(PeriodReport {
                period: period.resolve().unwrap(),
                balance_sheet: BalanceSheetAggregate::default(),
                balance_sheet_totals: BalanceSheetTotals::default(),
                income_statement: IncomeStatementAggregate::default(),
            })
        }
    }

    fn loader() -> PeriodReportLoader<SlowPriorYear> {
        PeriodReportLoader::new(SlowPriorYear {
            released: Notify::new(),
        })
    }

    #[tokio::test]
    async fn test_single_load_is_delivered() {
        let loader = loader();
        let report = loader.load(&Period::yearly(2024)).await.unwrap().unwrap();
        assert_eq!(report.period.year, 2024);
    }

    #[tokio::test]
    async fn test_stale_response_is_discarded() {
        let loader = loader();
        let (p2023, p2024) = (Period::yearly(2023), Period::yearly(2024));
        let (old, new) = tokio::join!(loader.load(&p2023), loader.load(&p2024));

        assert!(old.unwrap().is_none());
        assert_eq!(new.unwrap().unwrap().period.year, 2024);
    }

    #[tokio::test]
    async fn test_current_error_is_returned() {
        let loader = loader();
        let err = loader.load(&Period::yearly(1999)).await.unwrap_err();
        assert_eq!(err.status(), Some(400));
    }
}
