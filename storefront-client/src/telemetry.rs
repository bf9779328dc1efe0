use std::io::{self, IsTerminal};
use std::str::FromStr;

use tracing::Level;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer, filter, fmt};

/// Targets of the crates that make up the search service.
pub const SERVICE_TARGETS: &[&str] = &[
    "storefront_search",
    "storefront_client",
    "predictive_search",
    "api",
];

/// RFC3339 UTC timer, e.g. `2025-09-12T10:20:30Z`.
#[derive(Clone, Debug, Default)]
struct ChronoRfc3339Utc;

impl FormatTime for ChronoRfc3339Utc {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        let now = chrono::Utc::now();
        w.write_str(&now.to_rfc3339_opts(chrono::SecondsFormat::Secs, true))
    }
}

/// Formatting layer that renders only events whose target starts with one
/// of `targets`.
///
/// - RFC3339 UTC timestamps with seconds precision
/// - Compact single-line format with `file:line`
/// - ANSI colors only when stdout is a terminal
///
/// The per-layer filter leaves logs of other crates to whatever else the
/// binary composes into its subscriber.
pub fn layer<S>(targets: &'static [&'static str]) -> impl Layer<S> + Send + Sync
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    layer_with_writer(targets, io::stdout, io::stdout().is_terminal())
}

/// [`layer`] writing to `writer` instead of stdout.
pub fn layer_with_writer<S, W>(
    targets: &'static [&'static str],
    writer: W,
    use_ansi: bool,
) -> impl Layer<S> + Send + Sync
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let only_service =
        filter::filter_fn(move |meta| targets.iter().any(|t| meta.target().starts_with(t)));

    // The timer lives on the event format; a timer set on the layer is
    // discarded once `event_format` replaces the formatter.
    let format = fmt::format()
        .compact()
        .with_timer(ChronoRfc3339Utc)
        .with_level(true)
        .with_target(true)
        .with_source_location(true);

    fmt::layer()
        .with_writer(writer)
        .with_ansi(use_ansi)
        .event_format(format)
        .with_filter(only_service)
}

/// Level directive for one target, e.g. `predictive_search=debug`.
///
/// Returns `None` when `target` is not a valid directive name.
pub fn level_directive(target: &str, level: Level) -> Option<Directive> {
    let s = format!("{target}={}", level.as_str().to_lowercase());
    Directive::from_str(&s).ok()
}

/// `EnvFilter` from `RUST_LOG` when set. Otherwise `default` globally and
/// `level` for every service target.
pub fn env_filter_with_level(default: &str, level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        SERVICE_TARGETS
            .iter()
            .filter_map(|t| level_directive(t, level))
            .fold(EnvFilter::new(default), EnvFilter::add_directive)
    })
}
