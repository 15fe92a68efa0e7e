use std::path::Path;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::writer::MakeWriterExt;

// Guards must live until main() returns or buffered lines are lost
pub fn init(level: Level, console: bool, log_file: Option<&Path>) -> Vec<WorkerGuard> {
    let mut guards = Vec::new();
    let format = tracing_subscriber::fmt::format()
        .with_level(true) // include levels in formatted output
        .with_target(true) // include targets
        .with_thread_ids(false) // don't include the thread ID of the current thread
        .with_thread_names(false) // don't include the name of the current thread
        .compact(); // use the `Compact` formatting style.

    let file_writer = log_file.map(|path| {
        let dir = path.parent().unwrap_or_else(|| Path::new("."));
        let name = path.file_name().unwrap_or_else(|| "monnit.log".as_ref());
        let appender = tracing_appender::rolling::never(dir, name);
        let (writer, guard) = tracing_appender::non_blocking(appender);
        guards.push(guard);
        writer
    });

    let builder = tracing_subscriber::fmt()
        .event_format(format)
        .with_max_level(level);
    match (console, file_writer) {
        (true, Some(file)) => builder.with_writer(std::io::stderr.and(file)).init(),
        (false, Some(file)) => builder.with_ansi(false).with_writer(file).init(),
        (_, None) => builder.with_writer(std::io::stderr).init(),
    }
    guards
}
