//! Telemetry command handlers.

use chrono::DateTime;
use serde::Serialize;
use tabled::Tabled;

use nmsops_core::{
    AggregationMode, Console, CoreError, CounterId, DeviceAddress, NormalizedSeries,
    TelemetrySample,
};

use crate::cli::{GlobalOpts, TelemetryArgs, TelemetryCommand};
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct SampleRow {
    #[tabled(rename = "Counter")]
    counter: &'static str,
    #[tabled(rename = "Time (UTC)")]
    time: String,
    #[tabled(rename = "Value")]
    value: String,
}

#[derive(Serialize)]
struct SeriesView {
    counter_id: CounterId,
    samples: Vec<TelemetrySample>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl SeriesView {
    fn new(counter_id: CounterId, result: &Result<NormalizedSeries, CoreError>) -> Self {
        match result {
            Ok(series) => Self {
                counter_id,
                samples: series.samples.clone(),
                error: series.diagnostic.as_ref().map(ToString::to_string),
            },
            Err(e) => Self {
                counter_id,
                samples: Vec::new(),
                error: Some(e.to_string()),
            },
        }
    }
}

#[derive(Serialize)]
struct TelemetryView {
    device: String,
    from: i64,
    to: i64,
    aggregation: AggregationMode,
    interval: u32,
    disk: SeriesView,
    cpu: SeriesView,
}

fn format_time(millis: i64) -> String {
    DateTime::from_timestamp_millis(millis).map_or_else(
        || millis.to_string(),
        |t| t.format("%Y-%m-%d %H:%M:%S").to_string(),
    )
}

fn rows(view: &TelemetryView) -> Vec<SampleRow> {
    [("disk", &view.disk), ("cpu", &view.cpu)]
        .into_iter()
        .flat_map(|(name, series)| {
            series.samples.iter().map(move |s| SampleRow {
                counter: name,
                time: format_time(s.timestamp_millis),
                value: format!("{:.2}", s.value),
            })
        })
        .collect()
}

fn detail(view: &TelemetryView) -> String {
    let mut lines = vec![
        format!("Device:      {}", view.device),
        format!(
            "Window:      {} .. {}",
            format_time(view.from.saturating_mul(1000)),
            format_time(view.to.saturating_mul(1000))
        ),
        format!("Aggregation: {}", view.aggregation),
        format!("Interval:    {}", view.interval),
    ];
    for (label, series) in [("Disk:       ", &view.disk), ("CPU:        ", &view.cpu)] {
        lines.push(match series.error {
            Some(ref e) => format!("{label}unavailable ({e})"),
            None => format!("{label}{} sample(s)", series.samples.len()),
        });
    }

    let samples = rows(view);
    if !samples.is_empty() {
        lines.push(String::new());
        lines.push(output::render_table(&samples));
    }
    lines.join("\n")
}

fn plain(view: &TelemetryView) -> String {
    rows(view)
        .into_iter()
        .map(|r| format!("{}\t{}\t{}", r.counter, r.time, r.value))
        .collect::<Vec<_>>()
        .join("\n")
}

pub async fn handle(
    console: &Console,
    args: TelemetryArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        TelemetryCommand::Show {
            device,
            duration,
            aggregation,
        } => {
            let address = DeviceAddress::parse(&device)?;
            let telemetry = console
                .device_telemetry(address, duration.secs(), aggregation)
                .await?;

            let view = TelemetryView {
                device: telemetry.device.to_string(),
                from: telemetry.window.from(),
                to: telemetry.window.to(),
                aggregation: telemetry.aggregation,
                interval: telemetry.interval,
                disk: SeriesView::new(console.config().disk_counter, &telemetry.disk),
                cpu: SeriesView::new(console.config().cpu_counter, &telemetry.cpu),
            };

            let out = output::render_single(&global.output, &view, detail, plain);
            output::print_output(&out, global.quiet);

            // One failed counter is reported inline; both failing fails
            // the command.
            match (telemetry.disk, telemetry.cpu) {
                (Err(e), Err(_)) => Err(e.into()),
                _ => Ok(()),
            }
        }
    }
}
