//! Suspending call surface under a tokio runtime

use boundlog::prelude::*;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let logger = Arc::new(
        FilteringLogger::builder()
            .min_level(Level::Debug)
            .processor(Timestamper::new())
            .processor(JsonRenderer::new())
            .target(ConsoleTarget::new())
            .build()
            .bind([("service", "async-demo")]),
    );

    logger.ainfo("runtime up", &[], &[]).await.unwrap();

    // Independently-derived loggers share no mutable state, so concurrent
    // tasks need no coordination
    let tasks: Vec<_> = (0..4)
        .map(|worker| {
            let worker_logger = logger.bind([("worker", worker as i64)]);
            tokio::spawn(async move {
                for i in 0..3 {
                    worker_logger
                        .adebug("tick %d", &[Value::from(i)], &[])
                        .await
                        .unwrap();
                }
                worker_logger.ainfo("worker done", &[], &[]).await.unwrap();
            })
        })
        .collect();

    for task in tasks {
        task.await.unwrap();
    }

    logger
        .ainfo("all workers finished", &[], &[("count", Value::from(4))])
        .await
        .unwrap();
}
