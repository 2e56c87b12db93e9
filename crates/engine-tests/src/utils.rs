#![allow(dead_code)]

use async_trait::async_trait;
use engine_core::{connectors::source::ReportSource, error::SourceError};
use model::{
    execution::request::{EstablishmentId, ReportRequest},
    pagination::page::PageOutcome,
    records::row::RawRow,
};
use serde_json::{Value, json};
use std::{
    collections::{HashMap, VecDeque},
    io::{Read, Write},
    net::TcpListener,
    path::Path,
    sync::Mutex,
    thread,
};

/// In-memory report source answering from per-establishment page scripts.
///
/// An establishment with no script left answers `EndOfData`. Every request
/// is recorded as `(establishment, offset)`.
#[derive(Default)]
pub struct ScriptedSource {
    pages: Mutex<HashMap<u64, VecDeque<PageOutcome>>>,
    failing: Mutex<Option<u64>>,
    requests: Mutex<Vec<(u64, usize)>>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pages(self, establishment: u64, pages: Vec<PageOutcome>) -> Self {
        self.pages
            .lock()
            .unwrap()
            .insert(establishment, pages.into());
        self
    }

    /// Requests for `establishment` fail like a dropped connection.
    pub fn failing_for(self, establishment: u64) -> Self {
        *self.failing.lock().unwrap() = Some(establishment);
        self
    }

    pub fn requests(&self) -> Vec<(u64, usize)> {
        self.requests.lock().unwrap().clone()
    }

    pub fn offsets_for(&self, establishment: u64) -> Vec<usize> {
        self.requests()
            .into_iter()
            .filter(|(e, _)| *e == establishment)
            .map(|(_, offset)| offset)
            .collect()
    }
}

#[async_trait]
impl ReportSource for ScriptedSource {
    async fn fetch(&self, request: &ReportRequest) -> Result<PageOutcome, SourceError> {
        let EstablishmentId(id) = request.establishment;
        self.requests.lock().unwrap().push((id, request.offset()));

        if *self.failing.lock().unwrap() == Some(id) {
            return Err(SourceError::Unexpected(format!(
                "connection reset while fetching establishment {id}"
            )));
        }

        let outcome = self
            .pages
            .lock()
            .unwrap()
            .get_mut(&id)
            .and_then(VecDeque::pop_front)
            .unwrap_or(PageOutcome::EndOfData);
        Ok(outcome)
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// A page of `count` rows, each `{"amount": amount, "index": i}`.
pub fn page_of(count: usize, amount: i64) -> PageOutcome {
    PageOutcome::Page {
        rows: (0..count)
            .map(|i| RawRow::new(json!({"amount": amount, "index": i})))
            .collect(),
    }
}

pub fn page_from(rows: Vec<Value>) -> PageOutcome {
    PageOutcome::Page {
        rows: rows.into_iter().map(RawRow::new).collect(),
    }
}

/// Header and data rows of a written CSV file.
pub fn read_csv(path: &Path) -> (Vec<String>, Vec<Vec<String>>) {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)
        .expect("open csv");

    let mut records = reader
        .records()
        .map(|r| r.expect("csv record").iter().map(str::to_string).collect::<Vec<String>>())
        .collect::<Vec<Vec<String>>>()
        .into_iter();

    let header = records.next().unwrap_or_default();
    (header, records.collect())
}

/// Serves one canned JSON body per connection, in order, then stops.
/// Returns the base URL and a handle yielding the raw request lines.
pub fn spawn_report_server(
    responses: Vec<(&'static str, String)>,
) -> (String, thread::JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind test server");
    let addr = listener.local_addr().expect("local addr");

    let handle = thread::spawn(move || {
        let mut request_lines = Vec::new();
        for (status_line, body) in responses {
            let (mut stream, _) = listener.accept().expect("accept");
            let mut buf = Vec::new();
            let mut chunk = [0u8; 1024];
            while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut chunk).expect("read request");
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
            }
            let raw = String::from_utf8_lossy(&buf).to_string();
            request_lines.push(raw.lines().next().unwrap_or_default().to_string());

            let response = format!(
                "{status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).expect("write response");
        }
        request_lines
    });

    (format!("http://{addr}"), handle)
}

/// Body of a report response holding `count` rows.
pub fn report_body(count: usize, amount: i64) -> String {
    let rows: Vec<Value> = (0..count)
        .map(|i| json!({"amount": amount, "index": i, "unmapped": "x"}))
        .collect();
    json!({ "sales_summary": rows }).to_string()
}
