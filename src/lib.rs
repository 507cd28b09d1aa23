use gloo_timers::future::TimeoutFuture;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use std::future::Future;

pub mod api;
pub mod config;
pub mod state;

use config::{
    NEGOTIATION_LOWER_FACTOR, NEGOTIATION_ROUNDING_STEP, NEGOTIATION_UPPER_FACTOR,
};

// Longest decimal prefix accepted by JavaScript's `parseFloat`.
static FLOAT_PREFIX_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(Infinity|(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?)").unwrap()
});

/// One selectable choice of a dropdown, as served by the enumeration endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionEntry {
    pub label: String,
    pub id: String,
}

/// The option a user picked in one of the three dropdowns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub id: String,
    pub label: String,
}

impl From<&OptionEntry> for Selection {
    fn from(entry: &OptionEntry) -> Self {
        Selection {
            id: entry.id.clone(),
            label: entry.label.clone(),
        }
    }
}

/// Everything captured from the form when the user asks for an estimate.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub state: Selection,
    pub job: Selection,
    pub experience: Selection,
}

impl Submission {
    /// Feature vector in the order the model expects: state, title, experience.
    pub fn features(&self) -> [f64; 3] {
        [
            parse_identifier(&self.state.id),
            parse_identifier(&self.job.id),
            parse_identifier(&self.experience.id),
        ]
    }

    /// Sentence shown for a successful prediction, including negotiation advice.
    pub fn estimate_text(&self, prediction: f64) -> String {
        let salary = js_round(prediction);
        let (upper, lower) = negotiation_bounds(prediction);
        format!(
            "{} {} in {} should make {} per year.\n\nStart your negotiation with a salary of {} and take no less than {}.",
            self.experience.label,
            self.job.label,
            self.state.label,
            format_usd(salary),
            format_usd(upper),
            format_usd(lower)
        )
    }
}

/// Convert an option identifier the way `parseFloat` would.
///
/// Leading whitespace is skipped and the longest numeric prefix is used, so
/// `"12abc"` yields `12.0`. Anything without a numeric prefix yields `NaN`,
/// which is sent to the backend unchanged.
pub fn parse_identifier(raw: &str) -> f64 {
    let trimmed = raw.trim_start();
    let Some(found) = FLOAT_PREFIX_REGEX.find(trimmed) else {
        debug!("Identifier '{}' is not numeric", raw);
        return f64::NAN;
    };
    let literal = found.as_str();
    match literal.trim_start_matches(['+', '-']) {
        "Infinity" if literal.starts_with('-') => f64::NEG_INFINITY,
        "Infinity" => f64::INFINITY,
        _ => literal.parse::<f64>().unwrap_or(f64::NAN),
    }
}

/// Round to the nearest integer with ties going toward positive infinity,
/// matching `Math.round`.
#[inline]
pub fn js_round(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

/// Return `(upper, lower)` negotiation bounds: the rounded prediction ±10%,
/// each rounded to the nearest 10,000.
pub fn negotiation_bounds(prediction: f64) -> (f64, f64) {
    let salary = js_round(prediction);
    let snap = |value: f64| js_round(value / NEGOTIATION_ROUNDING_STEP) * NEGOTIATION_ROUNDING_STEP;
    (
        snap(salary * NEGOTIATION_UPPER_FACTOR),
        snap(salary * NEGOTIATION_LOWER_FACTOR),
    )
}

/// Format an amount as US dollars, e.g. `$120,000.00` or `-$1,250.50`.
///
/// Negative zero keeps its sign (`-$0.00`), as `toLocaleString` does.
pub fn format_usd(amount: f64) -> String {
    if amount.is_nan() {
        return "$NaN".to_string();
    }
    let sign = if amount.is_sign_negative() { "-" } else { "" };
    if amount.is_infinite() {
        return format!("{}$∞", sign);
    }

    let cents = (amount.abs() * 100.0).round() as u128;
    format!(
        "{}${}.{:02}",
        sign,
        group_thousands(cents / 100),
        cents % 100
    )
}

fn group_thousands(value: u128) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// How much longer the loader must stay up after `elapsed_ms` to honour a
/// `min_ms` display floor.
pub fn remaining_display_ms(min_ms: u32, elapsed_ms: f64) -> u32 {
    (f64::from(min_ms) - elapsed_ms).max(0.0).ceil() as u32
}

/// Current high-resolution timestamp in milliseconds.
fn now_ms() -> f64 {
    gloo_utils::window()
        .performance()
        .map(|perf| perf.now())
        .unwrap_or_else(js_sys::Date::now)
}

/// Await `fut`, then keep waiting until at least `min_ms` have passed since
/// the call started.
pub async fn with_minimum_duration<F: Future>(min_ms: u32, fut: F) -> F::Output {
    with_minimum_duration_by(min_ms, fut, now_ms, TimeoutFuture::new).await
}

/// [`with_minimum_duration`] over an explicit clock and sleeper.
pub async fn with_minimum_duration_by<F, N, S, W>(
    min_ms: u32,
    fut: F,
    mut now: N,
    sleep: S,
) -> F::Output
where
    F: Future,
    N: FnMut() -> f64,
    S: FnOnce(u32) -> W,
    W: Future<Output = ()>,
{
    let started = now();
    let output = fut.await;
    let wait = remaining_display_ms(min_ms, now() - started);
    if wait > 0 {
        debug!("Holding the loader for another {} ms", wait);
        sleep(wait).await;
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;
    use std::cell::Cell;
    use std::rc::Rc;

    fn selection(id: &str, label: &str) -> Selection {
        Selection {
            id: id.to_string(),
            label: label.to_string(),
        }
    }

    fn submission() -> Submission {
        Submission {
            state: selection("4", "California"),
            job: selection("17", "Data Scientist"),
            experience: selection("2", "Senior"),
        }
    }

    #[test]
    fn parse_identifier_follows_parse_float() {
        assert_eq!(parse_identifier("12"), 12.0);
        assert_eq!(parse_identifier("  3.5"), 3.5);
        assert_eq!(parse_identifier("12abc"), 12.0);
        assert_eq!(parse_identifier("-7"), -7.0);
        assert_eq!(parse_identifier(".25"), 0.25);
        assert_eq!(parse_identifier("1e3"), 1000.0);
        assert_eq!(parse_identifier("2e"), 2.0);
        assert_eq!(parse_identifier("Infinity"), f64::INFINITY);
        assert!(parse_identifier("abc").is_nan());
        assert!(parse_identifier("").is_nan());
    }

    #[test]
    fn js_round_sends_ties_up() {
        assert_eq!(js_round(2.5), 3.0);
        assert_eq!(js_round(-2.5), -2.0);
        assert_eq!(js_round(2.4), 2.0);
        assert_eq!(js_round(-2.6), -3.0);
        assert_eq!(js_round(0.49999999999999994), 0.0);
        assert!(js_round(f64::NAN).is_nan());
    }

    #[test]
    fn format_usd_matches_en_us_currency() {
        assert_eq!(format_usd(120_000.0), "$120,000.00");
        assert_eq!(format_usd(999.0), "$999.00");
        assert_eq!(format_usd(1_000.0), "$1,000.00");
        assert_eq!(format_usd(1_234_567.5), "$1,234,567.50");
        assert_eq!(format_usd(0.0), "$0.00");
        assert_eq!(format_usd(-1_250.0), "-$1,250.00");
        assert_eq!(format_usd(f64::NAN), "$NaN");
    }

    #[test]
    fn format_usd_keeps_negative_zero_sign() {
        assert_eq!(format_usd(-0.0), "-$0.00");
        assert_eq!(format_usd(-0.001), "-$0.00");
    }

    #[test]
    fn negotiation_bounds_snap_to_ten_thousand() {
        assert_eq!(negotiation_bounds(120_000.0), (130_000.0, 110_000.0));
        assert_eq!(negotiation_bounds(87_654.4), (100_000.0, 80_000.0));
        // 50_000 * 0.9 = 45_000 sits on a tie and rounds up
        assert_eq!(negotiation_bounds(50_000.0), (60_000.0, 50_000.0));
    }

    #[test]
    fn estimate_text_for_round_prediction() {
        assert_eq!(
            submission().estimate_text(120_000.0),
            "Senior Data Scientist in California should make $120,000.00 per year.\n\n\
             Start your negotiation with a salary of $130,000.00 and take no less than $110,000.00."
        );
    }

    #[test]
    fn estimate_text_rounds_prediction_first() {
        let text = submission().estimate_text(98_765.5);
        assert!(text.contains("should make $98,766.00 per year."));
        assert!(text.contains("salary of $110,000.00"));
        assert!(text.contains("no less than $90,000.00."));
    }

    #[test]
    fn features_keep_state_job_experience_order() {
        assert_eq!(submission().features(), [4.0, 17.0, 2.0]);
    }

    #[test]
    fn fast_response_waits_out_the_floor() {
        assert_eq!(remaining_display_ms(2000, 10.0), 1990);
        assert_eq!(remaining_display_ms(2000, 0.0), 2000);
        assert_eq!(remaining_display_ms(2000, 1999.2), 1);
    }

    #[test]
    fn slow_response_adds_no_delay() {
        assert_eq!(remaining_display_ms(2000, 2500.0), 0);
        assert_eq!(remaining_display_ms(2000, 2000.0), 0);
    }

    /// Runs `with_minimum_duration_by` where the wrapped future takes
    /// `response_ms` on a fake clock; returns the output and the requested sleep.
    fn time_request(response_ms: f64) -> (&'static str, Option<u32>) {
        let clock = Rc::new(Cell::new(1_000.0));
        let slept = Rc::new(Cell::new(None));

        let request = {
            let clock = clock.clone();
            async move {
                clock.set(clock.get() + response_ms);
                "done"
            }
        };
        let now = {
            let clock = clock.clone();
            move || clock.get()
        };
        let sleep = {
            let slept = slept.clone();
            move |ms: u32| {
                slept.set(Some(ms));
                std::future::ready(())
            }
        };

        let output = block_on(with_minimum_duration_by(2000, request, now, sleep));
        (output, slept.get())
    }

    #[test]
    fn fast_request_holds_loader_for_the_rest_of_the_floor() {
        assert_eq!(time_request(10.0), ("done", Some(1990)));
    }

    #[test]
    fn slow_request_is_not_delayed_further() {
        assert_eq!(time_request(2500.0), ("done", None));
    }

    #[test]
    fn request_exactly_at_the_floor_is_not_delayed() {
        assert_eq!(time_request(2000.0), ("done", None));
    }
}
