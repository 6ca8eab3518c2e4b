use leptos::prelude::*;
use leptos_use::{use_interval_fn_with_options, UseIntervalFnOptions};

use crate::metric::parse_metric_value;

const FRAME_MS: u64 = 16;
const DEFAULT_DURATION_MS: u64 = 1600;

/// Counts a metric display string like `"$184.4M"` up from zero once the page
/// is running in the browser. The server renders the final value.
#[component]
pub fn MetricCounter(
    #[prop(into)] value: String,
    #[prop(into)] label: String,
    #[prop(optional)] duration_ms: Option<u64>,
) -> impl IntoView {
    let parsed = parse_metric_value(&value);
    let duration = duration_ms.unwrap_or(DEFAULT_DURATION_MS).max(1);
    let (elapsed, set_elapsed) = signal(duration);

    let final_text = parsed.frame(1.0);
    let parsed = StoredValue::new(parsed);
    let text = move || parsed.with_value(|p| p.frame(elapsed.get() as f64 / duration as f64));

    let interval = use_interval_fn_with_options(
        move || set_elapsed.update(|e| *e = (*e + FRAME_MS).min(duration)),
        FRAME_MS,
        UseIntervalFnOptions::default().immediate(false),
    );
    let (pause, resume) = (interval.pause, interval.resume);

    Effect::new(move |_| {
        set_elapsed.set(0);
        resume();
    });
    Effect::new(move |_| {
        if elapsed.get() >= duration {
            pause();
        }
    });

    view! {
        <div class="flex flex-col items-center p-4 rounded-md bg-brightBlack/30 border border-muted/30">
            <span class="text-3xl font-bold text-cyan tabular-nums" aria-label=final_text>
                {text}
            </span>
            <span class="mt-1 text-sm text-muted text-center">{label}</span>
        </div>
    }
}
