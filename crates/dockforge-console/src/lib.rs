//! Colorful console output for allocation runs.
//!
//! Provides a custom `tracing` layer that formats engine events with colors.
//!
//! ## Log Levels
//!
//! - **INFO**: Lifecycle events (solve start/end)
//! - **DEBUG**: Stage details (gate, dock capacity, incumbents)
//! - **WARN**: Skipped input records

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::OnceLock;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{filter::LevelFilter, EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();

/// Package version for banner display.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initializes console output.
///
/// Safe to call multiple times - only the first call has effect. The
/// `RUST_LOG` environment variable overrides the default
/// `dockforge_solver=info` directive.
pub fn init() {
    INIT.get_or_init(|| {
        print_banner();

        let filter = EnvFilter::builder()
            .with_default_directive(solver_directive())
            .from_env_lossy();

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(DockConsoleLayer)
            .try_init();
    });
}

fn solver_directive() -> tracing_subscriber::filter::Directive {
    match "dockforge_solver=info".parse() {
        Ok(directive) => directive,
        Err(_) => LevelFilter::INFO.into(),
    }
}

fn print_banner() {
    let mut stdout = io::stdout().lock();
    let _ = writeln!(
        stdout,
        "{} {}",
        "⚓ Dockforge".bright_cyan().bold(),
        format!("v{VERSION} - berth allocation engine").bright_white()
    );
    let _ = stdout.flush();
}

/// A tracing layer that formats engine events with colors.
pub struct DockConsoleLayer;

impl<S: Subscriber> Layer<S> for DockConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if !metadata.target().starts_with("dockforge") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor, *metadata.level());
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Debug, Default)]
struct EventVisitor {
    event: Option<String>,
    message: Option<String>,
    criterion: Option<String>,
    strategy: Option<String>,
    score: Option<String>,
    dock_id: Option<String>,
    ship_id: Option<String>,
    ship_count: Option<u64>,
    dock_count: Option<u64>,
    existing_count: Option<u64>,
    assigned: Option<u64>,
    unassigned: Option<u64>,
    nodes: Option<u64>,
    duration_ms: Option<u64>,
    objective: Option<f64>,
    total: Option<f64>,
    occupied: Option<f64>,
    available: Option<f64>,
    tide: Option<f64>,
    wind: Option<f64>,
    exhaustive: Option<bool>,
    weather_warning: Option<bool>,
    open: Option<bool>,
}

fn unquote(value: &dyn std::fmt::Debug) -> String {
    format!("{:?}", value).trim_matches('"').to_string()
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        match field.name() {
            "event" => self.event = Some(unquote(value)),
            "message" => self.message = Some(unquote(value)),
            "criterion" => self.criterion = Some(unquote(value)),
            "strategy" => self.strategy = Some(unquote(value)),
            "score" => self.score = Some(unquote(value)),
            "dock_id" => self.dock_id = Some(unquote(value)),
            "ship_id" => self.ship_id = Some(unquote(value)),
            _ => {}
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.record_debug(field, &value);
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "ship_count" => self.ship_count = Some(value),
            "dock_count" => self.dock_count = Some(value),
            "existing_count" => self.existing_count = Some(value),
            "assigned" => self.assigned = Some(value),
            "unassigned" => self.unassigned = Some(value),
            "nodes" => self.nodes = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value.max(0) as u64);
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        match field.name() {
            "objective" => self.objective = Some(value),
            "total" => self.total = Some(value),
            "occupied" => self.occupied = Some(value),
            "available" => self.available = Some(value),
            "tide" => self.tide = Some(value),
            "wind" => self.wind = Some(value),
            _ => {}
        }
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        match field.name() {
            "exhaustive" => self.exhaustive = Some(value),
            "weather_warning" => self.weather_warning = Some(value),
            "open" => self.open = Some(value),
            _ => {}
        }
    }
}

fn format_event(v: &EventVisitor, level: Level) -> String {
    match v.event.as_deref().unwrap_or("") {
        "solve_start" => format_solve_start(v),
        "solve_end" => format_solve_end(v),
        "gate" => format_gate(v),
        "dock_capacity" => format_dock_capacity(v),
        "new_incumbent" => format_incumbent(v),
        _ if level == Level::WARN => format_warning(v),
        _ => String::new(),
    }
}

fn count(value: Option<u64>) -> String {
    value.unwrap_or(0).to_formatted_string(&Locale::en)
}

fn format_solve_start(v: &EventVisitor) -> String {
    format!(
        "{} Allocating │ {} ships │ {} docks │ {} existing │ {}",
        "▶".bright_green().bold(),
        count(v.ship_count).bright_yellow(),
        count(v.dock_count).bright_yellow(),
        count(v.existing_count).bright_yellow(),
        v.criterion.as_deref().unwrap_or("balanced").bright_magenta()
    )
}

fn format_solve_end(v: &EventVisitor) -> String {
    if v.weather_warning == Some(true) {
        return format!(
            "{} Weather gate closed │ {} ships held",
            "■".bright_red().bold(),
            count(v.unassigned).bright_red().bold()
        );
    }

    let proof = if v.exhaustive.unwrap_or(false) {
        "optimal".bright_green().bold().to_string()
    } else {
        "best found".yellow().bold().to_string()
    };
    format!(
        "{} Allocation complete │ {} assigned │ {} unassigned │ objective {} ({}) │ {} │ {} nodes │ {}",
        "■".bright_cyan().bold(),
        count(v.assigned).bright_green(),
        count(v.unassigned).yellow(),
        format_objective(v.objective.unwrap_or(0.0)),
        proof,
        v.strategy.as_deref().unwrap_or("Skipped").white(),
        count(v.nodes).white(),
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow()
    )
}

fn format_gate(v: &EventVisitor) -> String {
    let state = if v.open.unwrap_or(true) {
        "open".bright_green().to_string()
    } else {
        "closed".bright_red().bold().to_string()
    };
    format!(
        "  {} Weather │ tide {}m │ wind {} kn │ {}",
        "≈".bright_blue(),
        v.tide.unwrap_or(0.0),
        v.wind.unwrap_or(0.0),
        state
    )
}

fn format_dock_capacity(v: &EventVisitor) -> String {
    format!(
        "  {} Dock {:<10} │ {:>8.1}m total │ {:>8.1}m occupied │ {:>8.1}m free",
        "▣".bright_blue(),
        v.dock_id.as_deref().unwrap_or("?").white().bold(),
        v.total.unwrap_or(0.0),
        v.occupied.unwrap_or(0.0),
        v.available.unwrap_or(0.0),
    )
}

fn format_incumbent(v: &EventVisitor) -> String {
    format!(
        "  {} New best {} after {} nodes",
        "★".bright_yellow(),
        v.score.as_deref().unwrap_or("N/A").bright_green(),
        count(v.nodes).bright_black()
    )
}

fn format_warning(v: &EventVisitor) -> String {
    let mut output = format!(
        "{} {}",
        "⚠".yellow().bold(),
        v.message.as_deref().unwrap_or("warning").yellow()
    );
    if let Some(ship) = &v.ship_id {
        output.push_str(&format!(" │ ship {}", ship));
    }
    if let Some(dock) = &v.dock_id {
        output.push_str(&format!(" │ dock {}", dock));
    }
    output
}

fn format_objective(value: f64) -> String {
    let text = format!("{value:.3}");
    if value < 0.0 {
        text.bright_red().to_string()
    } else if value > 0.0 {
        text.bright_green().to_string()
    } else {
        text.white().to_string()
    }
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solve_start() {
        let v = EventVisitor {
            event: Some("solve_start".into()),
            ship_count: Some(1_250),
            dock_count: Some(12),
            criterion: Some("waiting_time".into()),
            ..Default::default()
        };
        let out = format_event(&v, Level::INFO);
        assert!(out.contains("Allocating"));
        assert!(out.contains("1,250"));
        assert!(out.contains("waiting_time"));
    }

    #[test]
    fn test_solve_end_weather() {
        let v = EventVisitor {
            event: Some("solve_end".into()),
            weather_warning: Some(true),
            unassigned: Some(5),
            ..Default::default()
        };
        assert!(format_event(&v, Level::INFO).contains("Weather gate closed"));
    }

    #[test]
    fn test_solve_end_optimal() {
        let v = EventVisitor {
            event: Some("solve_end".into()),
            assigned: Some(3),
            exhaustive: Some(true),
            objective: Some(4.25),
            strategy: Some("ExhaustiveSearch".into()),
            ..Default::default()
        };
        let out = format_event(&v, Level::INFO);
        assert!(out.contains("optimal"));
        assert!(out.contains("4.250"));
        assert!(out.contains("ExhaustiveSearch"));
    }

    #[test]
    fn test_warning_and_unknown_events() {
        let warning = EventVisitor {
            event: Some("unknown_dock".into()),
            message: Some("existing allocation references an unknown dock".into()),
            dock_id: Some("d9".into()),
            ..Default::default()
        };
        let out = format_event(&warning, Level::WARN);
        assert!(out.contains("unknown dock"));
        assert!(out.contains("d9"));

        let other = EventVisitor {
            event: Some("node".into()),
            ..Default::default()
        };
        assert!(format_event(&other, Level::TRACE).is_empty());
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration_ms(250), "250ms");
        assert_eq!(format_duration_ms(1_500), "1.50s");
        assert_eq!(format_duration_ms(125_000), "2m 5s");
    }

    #[test]
    fn test_init_is_idempotent() {
        init();
        init();
    }
}
