//! tend due command implementation.

use std::time::Duration;

use chrono::Local;
use serde::Serialize;

use crate::app::App;
use crate::due::{DueAlert, DueScanner};
use crate::error::Result;
use crate::output::{emit_success, HumanOutput, OutputOptions};

#[derive(Serialize)]
struct DueData {
    due: Vec<DueEntry>,
}

#[derive(Serialize)]
struct DueEntry {
    id: String,
    text: String,
}

pub fn run_due(app: &mut App, output: OutputOptions, watch: bool) -> Result<()> {
    let window_secs = app.config().due.window_secs;
    let poll_secs = app.config().due.poll_secs;
    let mut scanner = DueScanner::new();

    if !watch {
        let alerts = scanner.scan(app.store().tasks(), Local::now(), window_secs);
        return emit(output, &alerts);
    }

    // Watch mode never returns on its own; the loop is torn down with the
    // process. The ledger window is kept rolled so a scan crossing
    // midnight stays consistent.
    loop {
        app.roll_ledger()?;
        let alerts = scanner.scan(app.store().tasks(), Local::now(), window_secs);
        for alert in &alerts {
            if let Some(line) = watch_line(alert, output)? {
                println!("{line}");
            }
        }
        std::thread::sleep(Duration::from_secs(poll_secs));
    }
}

/// Render one watch-mode alert. JSON mode gets one object per line so
/// the stream stays parseable; quiet suppresses the human line only.
fn watch_line(alert: &DueAlert, output: OutputOptions) -> Result<Option<String>> {
    if output.json {
        let entry = DueEntry {
            id: alert.id.to_string(),
            text: alert.text.clone(),
        };
        Ok(Some(serde_json::to_string(&entry)?))
    } else if output.quiet {
        Ok(None)
    } else {
        Ok(Some(format!(
            "due: {}  {}",
            &alert.id.to_string()[..8],
            alert.text
        )))
    }
}

fn emit(output: OutputOptions, alerts: &[DueAlert]) -> Result<()> {
    let mut human = HumanOutput::new(format!("{} task(s) due now", alerts.len()));
    for alert in alerts {
        human.push_detail(format!("{}  {}", &alert.id.to_string()[..8], alert.text));
    }

    emit_success(
        output,
        "due",
        &DueData {
            due: alerts
                .iter()
                .map(|alert| DueEntry {
                    id: alert.id.to_string(),
                    text: alert.text.clone(),
                })
                .collect(),
        },
        Some(&human),
    )
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    fn alert() -> DueAlert {
        DueAlert {
            id: Uuid::new_v4(),
            text: "ship release".to_string(),
        }
    }

    #[test]
    fn watch_emits_one_json_object_per_alert() {
        let alert = alert();
        let output = OutputOptions {
            json: true,
            quiet: false,
        };

        let line = watch_line(&alert, output).unwrap().expect("json line");
        let parsed: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["id"], alert.id.to_string());
        assert_eq!(parsed["text"], "ship release");
    }

    #[test]
    fn watch_json_is_not_suppressed_by_quiet() {
        let output = OutputOptions {
            json: true,
            quiet: true,
        };
        assert!(watch_line(&alert(), output).unwrap().is_some());
    }

    #[test]
    fn watch_human_line_respects_quiet() {
        let noisy = OutputOptions {
            json: false,
            quiet: false,
        };
        let quiet = OutputOptions {
            json: false,
            quiet: true,
        };

        let line = watch_line(&alert(), noisy).unwrap().expect("human line");
        assert!(line.starts_with("due: "));
        assert!(line.ends_with("ship release"));
        assert!(watch_line(&alert(), quiet).unwrap().is_none());
    }
}
