// Small dev utility: compute the timeline layout for a database and print it as JSON.
//
// Usage:
//   cargo run --bin render_timeline -- [db_path] [anchor YYYY-MM-DD] [months]
//
// Defaults: db_path from MP_SCHEDULE_DB_PATH or the user data dir, anchor = today, months = 6.
// MP_SCHEDULE_LOG_FORMAT=json switches the log output to JSON lines.

use chrono::Local;
use mp_schedule::api::GanttApi;
use mp_schedule::db::default_db_path;
use mp_schedule::domain::parse_calendar_date;
use mp_schedule::logging;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_from_env();

    let mut args = std::env::args().skip(1);
    let db_path = args
        .next()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(default_db_path);

    let anchor = match args.next() {
        Some(raw) => parse_calendar_date(&raw).ok_or_else(|| format!("invalid anchor date: '{}'", raw))?,
        None => Local::now().date_naive(),
    };

    let api = GanttApi::open(&db_path)?;
    let mut view = api.default_view(anchor)?;
    if let Some(raw) = args.next() {
        let months: u32 = raw.trim().parse()?;
        view.months_to_show = months.clamp(view.limits.min_months, view.limits.max_months);
    }

    let layout = api.render_timeline(&view)?;
    println!("{}", serde_json::to_string_pretty(&layout)?);

    if !layout.rejected.is_empty() {
        eprintln!("{} maintenance period(s) excluded, see log", layout.rejected.len());
    }
    Ok(())
}
