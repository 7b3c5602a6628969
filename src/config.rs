use std::time::Duration;

use crate::{form::FormTimings, scroll::NavPolicy, telemetry::LogLevel};

const DEFAULT_SUBMIT_LATENCY_MS: u64 = 2_000;
const DEFAULT_SUCCESS_DISPLAY_MS: u64 = 3_000;
const DEFAULT_NAV_THRESHOLD_PX: f64 = 100.0;
const DEFAULT_NAV_BLUR_MAX_PX: f64 = 20.0;
const DEFAULT_REVEAL_MARGIN_PX: f64 = -100.0;
const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;

const SUBMIT_LATENCY_MS_BOUNDS: (u64, u64) = (0, 60_000);
const SUCCESS_DISPLAY_MS_BOUNDS: (u64, u64) = (0, 60_000);
const NAV_THRESHOLD_PX_BOUNDS: (f64, f64) = (1.0, 2_000.0);
const NAV_BLUR_MAX_PX_BOUNDS: (f64, f64) = (0.0, 100.0);
const REVEAL_MARGIN_PX_BOUNDS: (f64, f64) = (-1_000.0, 1_000.0);

#[derive(Clone, Debug, PartialEq)]
pub struct SiteConfig {
    pub submit_latency: Duration,
    pub success_display: Duration,
    pub nav_threshold_px: f64,
    pub nav_blur_max_px: f64,
    pub reveal_margin_px: f64,
    pub log_level: LogLevel,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl SiteConfig {
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let submit_latency_ms = parse_u64_with_bounds(
            &lookup,
            "submit-latency-ms",
            DEFAULT_SUBMIT_LATENCY_MS,
            SUBMIT_LATENCY_MS_BOUNDS,
        );
        let success_display_ms = parse_u64_with_bounds(
            &lookup,
            "success-display-ms",
            DEFAULT_SUCCESS_DISPLAY_MS,
            SUCCESS_DISPLAY_MS_BOUNDS,
        );
        let nav_threshold_px = parse_f64_with_bounds(
            &lookup,
            "nav-threshold-px",
            DEFAULT_NAV_THRESHOLD_PX,
            NAV_THRESHOLD_PX_BOUNDS,
        );
        let nav_blur_max_px = parse_f64_with_bounds(
            &lookup,
            "nav-blur-max-px",
            DEFAULT_NAV_BLUR_MAX_PX,
            NAV_BLUR_MAX_PX_BOUNDS,
        );
        let reveal_margin_px = parse_f64_with_bounds(
            &lookup,
            "reveal-margin-px",
            DEFAULT_REVEAL_MARGIN_PX,
            REVEAL_MARGIN_PX_BOUNDS,
        );
        let log_level = parse_non_empty_string(&lookup, "log-level")
            .and_then(|value| LogLevel::from_str(&value))
            .unwrap_or(DEFAULT_LOG_LEVEL);

        Self {
            submit_latency: Duration::from_millis(submit_latency_ms),
            success_display: Duration::from_millis(success_display_ms),
            nav_threshold_px,
            nav_blur_max_px,
            reveal_margin_px,
            log_level,
        }
    }

    pub fn form_timings(&self) -> FormTimings {
        FormTimings {
            submit_latency: self.submit_latency,
            success_display: self.success_display,
        }
    }

    pub fn nav_policy(&self) -> NavPolicy {
        NavPolicy {
            threshold_px: self.nav_threshold_px,
            max_blur_px: self.nav_blur_max_px,
        }
    }
}

fn parse_non_empty_string(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<String> {
    lookup(name)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_u64_with_bounds(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: u64,
    bounds: (u64, u64),
) -> u64 {
    parse_non_empty_string(lookup, name)
        .and_then(|value| value.parse::<u64>().ok())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn parse_f64_with_bounds(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: f64,
    bounds: (f64, f64),
) -> f64 {
    parse_non_empty_string(lookup, name)
        .and_then(|value| value.parse::<f64>().ok())
        .filter(|value| value.is_finite() && (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}
