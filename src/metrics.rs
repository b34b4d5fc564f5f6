use hyper::service::{make_service_fn, service_fn};
use hyper::{Body, Request, Response, Server};
use once_cell::sync::Lazy;
use prometheus::{Encoder, Histogram, HistogramOpts, IntCounter, Registry, TextEncoder};
use std::time::{Duration, Instant};

static REGISTRY: Lazy<Registry> = Lazy::new(Registry::new);
static EXTRACT_DURATION: Lazy<Histogram> = Lazy::new(|| {
    Histogram::with_opts(HistogramOpts::new(
        "extract_duration_seconds",
        "Per-file cron group extraction duration",
    ))
    .unwrap()
});
static FILES_INDEXED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new("files_indexed_total", "cron_groups.xml files extracted").unwrap()
});
static EMPTY_RESULTS: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new("empty_results_total", "Extractions that yielded no groups").unwrap()
});

pub fn init() {
    let _ = REGISTRY.register(Box::new(EXTRACT_DURATION.clone()));
    let _ = REGISTRY.register(Box::new(FILES_INDEXED.clone()));
    let _ = REGISTRY.register(Box::new(EMPTY_RESULTS.clone()));
    start_server();
}

pub fn file_indexed(empty: bool) {
    FILES_INDEXED.inc();
    if empty {
        EMPTY_RESULTS.inc();
    }
}

pub fn observe_extract(dur: Duration) {
    EXTRACT_DURATION.observe(dur.as_secs_f64());
}

fn start_server() {
    tokio::spawn(async {
        let make_svc = make_service_fn(|_conn| async { Ok::<_, hyper::Error>(service_fn(handle)) });
        let addr = ([127, 0, 0, 1], 9899).into();
        let _ = Server::bind(&addr).serve(make_svc).await;
    });
}

async fn handle(_req: Request<Body>) -> Result<Response<Body>, hyper::Error> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer).unwrap();
    Ok(Response::new(Body::from(buffer)))
}

pub struct Timer {
    start: Instant,
}

impl Timer {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        observe_extract(self.start.elapsed());
    }
}
