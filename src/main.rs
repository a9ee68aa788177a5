use serde_json::Value;
use service_sheets::{
    config::app_config::AppConfig, prettyprint::prettyprint::PrettyFormatter, RgbColor,
    SpreadsheetFormat, SpreadsheetManager, SpreadsheetRead, SpreadsheetWrite,
};
use tracing::{error, info, instrument};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Registry};

#[tokio::main(flavor = "current_thread")]
#[instrument]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_tracing()?;
    setup_panic_hook();

    match run().await {
        Ok(()) => {
            info!("Demo completed successfully");
            Ok(())
        }
        Err(e) => {
            error!("Demo failed: {}", e);
            Err(e)
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env().map_err(|report| format!("{report:?}"))?;

    let spreadsheet_manager = SpreadsheetManager::new(config.sheets)
        .await
        .map_err(|report| format!("{report:?}"))?;

    let range = config.demo.range.as_str();

    let cells = spreadsheet_manager
        .read_rectangular(range)
        .await
        .map_err(|report| format!("{report:?}"))?;
    info!("Read {} rows from {}: {:?}", cells.len(), range, cells);

    spreadsheet_manager
        .map_cells(range, increment_cell)
        .await
        .map_err(|report| format!("{report:?}"))?;
    info!("Incremented numeric cells in {}", range);

    spreadsheet_manager
        .set_background_color(range, config.demo.color)
        .await
        .map_err(|report| format!("{report:?}"))?;
    info!("Painted {} with {:?}", range, config.demo.color);

    if let Some(fill_range) = config.demo.fill_range.as_deref() {
        let mut counter = 0u64;
        spreadsheet_manager
            .map_cells(fill_range, |_| {
                let value = Value::from(counter);
                counter += 1;
                value
            })
            .await
            .map_err(|report| format!("{report:?}"))?;

        let fill_color =
            RgbColor::new(0.8, 0.9, 0.8).map_err(|report| format!("{report:?}"))?;
        spreadsheet_manager
            .set_background_color(fill_range, fill_color)
            .await
            .map_err(|report| format!("{report:?}"))?;
        info!("Filled {} with a counter", fill_range);
    }

    Ok(())
}

/// Adds one to anything that looks like an integer, leaves the rest alone.
fn increment_cell(cell: &Value) -> Value {
    let parsed = match cell {
        Value::Number(number) => number.as_i64(),
        Value::String(text) => text.trim().parse::<i64>().ok(),
        _ => None,
    };

    match parsed.and_then(|number| number.checked_add(1)) {
        Some(number) => Value::from(number),
        None => cell.clone(),
    }
}

fn setup_tracing() -> Result<(), Box<dyn std::error::Error>> {
    let stdout_layer = tracing_subscriber::fmt::layer()
        .event_format(PrettyFormatter::new(true))
        .with_writer(std::io::stderr);

    let log_file_layer = tracing_subscriber::fmt::layer()
        .event_format(PrettyFormatter::new(false))
        .with_writer(std::sync::Mutex::new(std::fs::File::create(
            "service_sheets.log",
        )?))
        .with_ansi(false);

    Registry::default()
        .with(
            tracing_subscriber::filter::Targets::new()
                .with_target("service_sheets", tracing::Level::DEBUG),
        )
        .with(log_file_layer)
        .with(stdout_layer)
        .init();

    Ok(())
}

fn setup_panic_hook() {
    tracing::trace!("Setting panic hook");
    std::panic::set_hook(Box::new(|info| {
        tracing::error!("panic: {info}");
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_increment_cell() {
        assert_eq!(increment_cell(&json!("41")), json!(42));
        assert_eq!(increment_cell(&json!(" 7 ")), json!(8));
        assert_eq!(increment_cell(&json!(-1)), json!(0));
        assert_eq!(increment_cell(&json!("roses")), json!("roses"));
        assert_eq!(increment_cell(&json!("")), json!(""));
        assert_eq!(increment_cell(&json!(1.5)), json!(1.5));
        assert_eq!(increment_cell(&json!(i64::MAX)), json!(i64::MAX));
    }
}
