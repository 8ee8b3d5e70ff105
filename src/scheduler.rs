// src/scheduler.rs

use chrono::{DateTime, Duration, NaiveTime, Utc};
use log::info;
use std::thread;

/// The first `hour:00:00` UTC strictly after `now`.
pub fn next_run_after(now: DateTime<Utc>, hour: u32) -> DateTime<Utc> {
    let time = NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or(NaiveTime::MIN);
    let today = now.date_naive().and_time(time).and_utc();

    if today > now {
        today
    } else {
        today + Duration::days(1)
    }
}

/// Runs `job` once a day at `hour` UTC, forever.
pub fn run_daily<F: FnMut()>(hour: u32, mut job: F) -> ! {
    loop {
        let now = Utc::now();
        let next = next_run_after(now, hour);
        info!("⏰ Next run at {next}");

        thread::sleep((next - now).to_std().unwrap_or_default());
        job();
    }
}
