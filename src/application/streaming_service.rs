// Streaming dashboard service - Progressive loading as length-prefixed frames
use crate::application::kpi_service::KpiService;
use crate::domain::gauge::{ColorTag, GaugeSpec};
use crate::domain::kpi::KpiResult;
use crate::domain::production::Totals;
use serde::Serialize;
use std::time::Instant;
use tokio::sync::mpsc;

const CHANNEL_CAPACITY: usize = 16;

#[derive(Debug, Clone, Serialize)]
pub struct GaugeSkeleton {
    pub label: String,
    pub axis_min: f64,
    pub axis_max: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardSkeleton {
    pub title: String,
    pub record_count: usize,
    pub gauges: Vec<GaugeSkeleton>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompletionEvent {
    pub widget_count: usize,
    pub duration_ms: u64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StreamMessage {
    Skeleton(DashboardSkeleton),
    Kpis { totals: Totals, kpis: KpiResult },
    Gauge(GaugeSpec),
    Complete(CompletionEvent),
    /// Terminal frame; nothing follows it.
    Error { message: String },
}

#[derive(Clone)]
pub struct StreamingDashboardService {
    kpi_service: KpiService,
}

impl StreamingDashboardService {
    pub fn new(kpi_service: KpiService) -> Self {
        Self { kpi_service }
    }

    /// Skeleton first, then KPIs, then one message per gauge, then completion.
    /// A storage failure yields a single error frame instead.
    pub async fn stream_dashboard(&self, color_override: Option<ColorTag>) -> mpsc::Receiver<StreamMessage> {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        let start_time = Instant::now();

        let records = match self.kpi_service.history().await {
            Ok(records) => records,
            Err(e) => {
                tracing::error!("Error loading production history: {}", e);
                let _ = tx
                    .send(StreamMessage::Error {
                        message: e.to_string(),
                    })
                    .await;
                return rx;
            }
        };

        let dashboard = self.kpi_service.build_dashboard(&records, color_override);

        let skeleton = DashboardSkeleton {
            title: dashboard.title.clone(),
            record_count: dashboard.record_count,
            gauges: dashboard
                .gauges
                .iter()
                .map(|g| GaugeSkeleton {
                    label: g.label.clone(),
                    axis_min: g.axis_min,
                    axis_max: g.axis_max,
                })
                .collect(),
        };
        let _ = tx.send(StreamMessage::Skeleton(skeleton)).await;

        tokio::spawn(async move {
            let widget_count = dashboard.gauges.len();

            if tx
                .send(StreamMessage::Kpis {
                    totals: dashboard.totals,
                    kpis: dashboard.kpis,
                })
                .await
                .is_err()
            {
                tracing::debug!("Dashboard stream receiver dropped before KPIs");
                return;
            }

            for gauge in dashboard.gauges {
                if tx.send(StreamMessage::Gauge(gauge)).await.is_err() {
                    tracing::debug!("Dashboard stream receiver dropped mid-stream");
                    return;
                }
            }

            let complete = CompletionEvent {
                widget_count,
                duration_ms: start_time.elapsed().as_millis() as u64,
            };
            let _ = tx.send(StreamMessage::Complete(complete)).await;
        });

        rx
    }
}
