use tracing::{Event, Subscriber};
use tracing_subscriber::{
    fmt::{
        self,
        format::{Format, FormatEvent, FormatFields, Writer},
        FmtContext,
    },
    registry::LookupSpan,
};

/// Event format for diagnostics tracing: one line per event, indented by span depth.
pub struct PrettyFormatter {
    inner: Format,
}

impl PrettyFormatter {
    pub fn new(ansi: bool) -> Self {
        Self {
            inner: fmt::format()
                .with_ansi(ansi)
                .with_target(false)
                .with_file(false)
                .with_line_number(false)
                .with_level(true)
                .with_source_location(false),
        }
    }
}

impl<S, N> FormatEvent<S, N> for PrettyFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'writer> FormatFields<'writer> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let depth = ctx.event_scope().map(|scope| scope.count()).unwrap_or(0);

        for _ in 1..depth {
            write!(writer, "  ")?;
        }
        if depth > 0 {
            write!(writer, "└─")?;
        }

        self.inner.format_event(ctx, writer, event)
    }
}
