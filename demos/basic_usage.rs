//! Basic usage of the bound logger

use boundlog::prelude::*;
use boundlog::{error, info, warning};

fn main() {
    // The default pipeline: timestamps, key=value rendering, console output
    let logger = boundlog::default_logger().bind([("service", "demo")]);

    info!(logger, "application started").unwrap();
    info!(logger, "processed %d of %d items", 75, 100).unwrap();
    warning!(logger, "cache almost full"; used_mb = 480, limit_mb = 512).unwrap();

    // Derived loggers carry extra context without touching the parent
    let request_logger = logger.bind([("request_id", "r-7431")]);
    info!(request_logger, "request accepted"; method = "GET").unwrap();
    error!(request_logger, "upstream timed out"; upstream = "billing", ms = 3000).unwrap();

    // The parent still logs without the request binding
    info!(logger, "shutting down").unwrap();

    // Exception logging attaches captured error info for the chain to render
    let pipeline = FilteringLogger::builder()
        .processor(ExceptionFormatter::new())
        .processor(KeyValueRenderer::new())
        .target(ConsoleTarget::stderr())
        .build();

    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "state file missing");
    pipeline
        .exception(
            "recovery skipped",
            &[],
            &[(EXC_INFO_KEY, Value::from(ExcInfo::from_error(&io_err)))],
        )
        .unwrap();
}
