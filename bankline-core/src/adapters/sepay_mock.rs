//! Mock SePay API server for testing
//!
//! This module provides a mock HTTP server that simulates the SePay user
//! API, allowing for comprehensive testing without a real SePay account.
//!
//! The mock server implements the same response structure as the real API:
//! - GET /transactions/list returns { transactions: [...] } with
//!   `bank_brand_name` on each record
//! - GET /transactions/count returns { count_transactions: N }
//! - GET /transactions/{id} returns { transaction: {...} | null } with
//!   `bank_name` on the record

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use serde::Serialize;

/// Mock SePay server for testing
pub struct MockSePayServer {
    port: u16,
    running: Arc<AtomicBool>,
    thread_handle: Option<thread::JoinHandle<()>>,
}

/// Configuration for mock data generation
#[derive(Debug, Clone)]
pub struct MockConfig {
    /// Number of transactions returned by the list route
    pub num_transactions: usize,
    /// Bank label stamped on every generated record
    pub bank_label: String,
    /// Running balance reported on the final list record (0 = unreported)
    pub final_accumulated: i64,
    /// Whether to simulate authentication failure
    pub fail_auth: bool,
    /// Whether to simulate rate limiting
    pub rate_limit: bool,
    /// Transaction ID the by-id route knows about; everything else
    /// returns { "transaction": null }
    pub known_transaction_id: String,
    /// Delay in milliseconds before responding
    pub delay_ms: u64,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            num_transactions: 5,
            bank_label: "MB Bank".to_string(),
            final_accumulated: 0,
            fail_auth: false,
            rate_limit: false,
            known_transaction_id: "92704".to_string(),
            delay_ms: 0,
        }
    }
}

// Response structures matching the real API

#[derive(Serialize)]
struct ListResponse {
    transactions: Vec<MockListTransaction>,
}

/// List-route record: bank label field is `bank_brand_name`
#[derive(Serialize)]
struct MockListTransaction {
    id: u64,
    transaction_date: String,
    account_number: String,
    bank_brand_name: String,
    sub_account: Option<String>,
    amount_in: Option<String>,
    amount_out: Option<String>,
    accumulated: Option<i64>,
    code: Option<String>,
    transaction_content: String,
    reference_number: String,
}

#[derive(Serialize)]
struct CountResponse {
    count_transactions: u64,
}

#[derive(Serialize)]
struct SingleResponse {
    transaction: Option<MockDetailTransaction>,
}

/// By-id record: bank label field is `bank_name`
#[derive(Serialize)]
struct MockDetailTransaction {
    id: String,
    transaction_date: String,
    account_number: String,
    bank_name: String,
    sub_account: Option<String>,
    amount_in: Option<f64>,
    amount_out: Option<f64>,
    accumulated: Option<i64>,
    code: Option<String>,
    transaction_content: String,
    reference_number: String,
}

impl MockSePayServer {
    /// Start a new mock server on a random available port
    pub fn start(config: MockConfig) -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let port = listener.local_addr()?.port();
        let running = Arc::new(AtomicBool::new(true));
        let running_clone = running.clone();

        // Non-blocking accept loop so stop() can take effect
        listener.set_nonblocking(true)?;

        let thread_handle = thread::spawn(move || {
            while running_clone.load(Ordering::SeqCst) {
                match listener.accept() {
                    Ok((stream, _)) => {
                        let cfg = config.clone();
                        thread::spawn(move || {
                            handle_connection(stream, &cfg);
                        });
                    }
                    Err(ref e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                        thread::sleep(std::time::Duration::from_millis(10));
                    }
                    Err(_) => break,
                }
            }
        });

        Ok(Self {
            port,
            running,
            thread_handle: Some(thread_handle),
        })
    }

    /// Get the base URL for this mock server
    pub fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    /// Stop the mock server
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for MockSePayServer {
    fn drop(&mut self) {
        self.stop();
    }
}

fn handle_connection(mut stream: TcpStream, config: &MockConfig) {
    let mut buffer = [0; 4096];

    let Ok(n) = stream.read(&mut buffer) else {
        return;
    };
    let request = String::from_utf8_lossy(&buffer[..n]);

    if config.delay_ms > 0 {
        thread::sleep(std::time::Duration::from_millis(config.delay_ms));
    }

    let first_line = request.lines().next().unwrap_or("");
    let parts: Vec<&str> = first_line.split_whitespace().collect();
    if parts.len() < 2 {
        send_response(&mut stream, 400, "Bad Request", r#"{"error": "Invalid request"}"#);
        return;
    }

    let method = parts[0];
    let path = parts[1];

    if config.fail_auth || !request.to_lowercase().contains("authorization: bearer ") {
        send_response(&mut stream, 401, "Unauthorized", r#"{"error": "Invalid API key"}"#);
        return;
    }

    if config.rate_limit {
        send_response(
            &mut stream,
            429,
            "Too Many Requests",
            r#"{"error": "Rate limit exceeded"}"#,
        );
        return;
    }

    if method != "GET" {
        send_response(
            &mut stream,
            405,
            "Method Not Allowed",
            r#"{"error": "Method not allowed"}"#,
        );
        return;
    }

    let path_without_query = path.split('?').next().unwrap_or(path);

    if path_without_query == "/transactions/list" {
        let limit = extract_limit(path);
        let count = limit
            .map(|l| l.min(config.num_transactions))
            .unwrap_or(config.num_transactions);
        let response = ListResponse {
            transactions: generate_mock_transactions(count, config),
        };
        let json = serde_json::to_string(&response).unwrap();
        send_response(&mut stream, 200, "OK", &json);
    } else if path_without_query == "/transactions/count" {
        let response = CountResponse {
            count_transactions: config.num_transactions as u64,
        };
        let json = serde_json::to_string(&response).unwrap();
        send_response(&mut stream, 200, "OK", &json);
    } else if let Some(id) = path_without_query.strip_prefix("/transactions/") {
        let transaction = if id == config.known_transaction_id {
            Some(generate_mock_detail(id, config))
        } else {
            None
        };
        let json = serde_json::to_string(&SingleResponse { transaction }).unwrap();
        send_response(&mut stream, 200, "OK", &json);
    } else {
        send_response(
            &mut stream,
            404,
            "Not Found",
            r#"{"error": "Endpoint not found"}"#,
        );
    }
}

fn extract_limit(path: &str) -> Option<usize> {
    let query = path.split('?').nth(1)?;
    query
        .split('&')
        .find_map(|pair| pair.strip_prefix("limit="))
        .and_then(|v| v.parse().ok())
}

fn send_response(stream: &mut TcpStream, status: u16, status_text: &str, body: &str) {
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\r\n{}",
        status,
        status_text,
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}

fn generate_mock_transactions(count: usize, config: &MockConfig) -> Vec<MockListTransaction> {
    let contents = [
        ("salary payment", Some("1000000.00"), None),
        ("grocery store", None, Some("250000.00")),
        ("electricity bill", None, Some("420000.00")),
        ("transfer from friend", Some("300000.00"), None),
        ("coffee", None, Some("45000.00")),
    ];

    (0..count)
        .map(|i| {
            let (content, amount_in, amount_out) = contents[i % contents.len()];
            let is_last = i + 1 == count;
            let accumulated = if is_last && config.final_accumulated != 0 {
                Some(config.final_accumulated)
            } else {
                None
            };

            MockListTransaction {
                id: 92700 + i as u64,
                transaction_date: format!("2025-01-{:02} 10:30:00", (i % 28) + 1),
                account_number: "1234567890".to_string(),
                bank_brand_name: config.bank_label.clone(),
                sub_account: None,
                amount_in: amount_in.map(String::from),
                amount_out: amount_out.map(String::from),
                accumulated,
                code: None,
                transaction_content: format!("{} #{}", content, i + 1),
                reference_number: format!("REF{:06}", i + 1),
            }
        })
        .collect()
}

fn generate_mock_detail(id: &str, config: &MockConfig) -> MockDetailTransaction {
    MockDetailTransaction {
        id: id.to_string(),
        transaction_date: "2025-01-15 10:30:00".to_string(),
        account_number: "1234567890".to_string(),
        bank_name: config.bank_label.clone(),
        sub_account: Some("SUB01".to_string()),
        amount_in: Some(1_000_000.0),
        amount_out: None,
        accumulated: Some(config.final_accumulated),
        code: Some("FT25015".to_string()),
        transaction_content: "salary payment".to_string(),
        reference_number: "REF000001".to_string(),
    }
}
