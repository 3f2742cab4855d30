//! Countdown display
//!
//! Four padded blocks (days, hours, minutes, seconds) and a status line.
//! The server renders placeholders; after hydration a one second ticker
//! samples the clock once per tick and publishes digits and status from
//! that single reading.

use chrono::{DateTime, Utc};
use leptos::prelude::*;

#[cfg(not(feature = "ssr"))]
use crate::core::countdown::Countdown;
use crate::core::countdown::{CountdownSample, CountdownUnit, pad2};

/// Interval ticker that stops when dropped or on [`Ticker::stop`]
#[cfg(not(feature = "ssr"))]
struct Ticker {
    interval: Option<gloo_timers::callback::Interval>,
}

#[cfg(not(feature = "ssr"))]
impl Ticker {
    fn start(period_ms: u32, on_tick: impl FnMut() + 'static) -> Self {
        Self {
            interval: Some(gloo_timers::callback::Interval::new(period_ms, on_tick)),
        }
    }

    fn stop(&mut self) {
        if let Some(interval) = self.interval.take() {
            interval.cancel();
        }
    }
}

#[component]
pub fn CountdownTimer(target: DateTime<Utc>) -> impl IntoView {
    let sample = RwSignal::new(None::<CountdownSample>);

    #[cfg(not(feature = "ssr"))]
    {
        use crate::core::countdown::TICK_INTERVAL_MS;

        let countdown = StoredValue::new_local(Countdown::new(target));
        let tick = move || {
            let reading = countdown.try_update_value(|c| c.tick(Utc::now()));
            if let Some(reading) = reading {
                sample.set(Some(reading));
            }
        };

        // First reading once hydrated so the placeholders do not linger
        Effect::new(move |_| tick());
        let ticker = StoredValue::new_local(Ticker::start(TICK_INTERVAL_MS, tick));

        on_cleanup(move || {
            ticker.try_update_value(Ticker::stop);
        });
    }

    let blocks = [
        CountdownUnit::Days,
        CountdownUnit::Hours,
        CountdownUnit::Minutes,
        CountdownUnit::Seconds,
    ];

    view! {
        <div class="flex flex-col items-center mb-16" data-launch-at=target.to_rfc3339()>
            <div class="flex flex-wrap gap-4 md:gap-8 justify-center">
                {blocks
                    .into_iter()
                    .enumerate()
                    .map(|(index, unit)| {
                        let digits = move || {
                            sample
                                .get()
                                .map(|s| {
                                    let value = s
                                        .remaining
                                        .units()
                                        .into_iter()
                                        .find(|(u, _)| *u == unit)
                                        .map(|(_, v)| v)
                                        .unwrap_or(0);
                                    pad2(value)
                                })
                                .unwrap_or_else(|| "--".to_string())
                        };
                        view! {
                            <div
                                class="relative group countdown-block"
                                style=format!("animation-delay: {}s", index as f64 * 0.1)
                            >
                                <div class="relative bg-gray-800/50 backdrop-blur-sm border border-gray-700/50 rounded-2xl p-6 md:p-8 min-w-[100px] md:min-w-[140px] hover:border-primary-500/30 transition-all duration-300">
                                    <div class=format!(
                                        "text-4xl md:text-6xl font-bold bg-gradient-to-r {} bg-clip-text text-transparent tabular-nums",
                                        unit.gradient(),
                                    )>{digits}</div>
                                    <div class="text-sm text-gray-400 mt-2 font-medium text-center">
                                        {unit.label()}
                                    </div>
                                </div>
                            </div>
                        }
                    })
                    .collect_view()}
            </div>

            <p class="mt-6 text-sm font-medium text-primary-400 h-5" aria-live="polite">
                {move || sample.get().map(|s| s.status.label()).unwrap_or_default()}
            </p>
        </div>
    }
}
