//! Upload-workflow tests against a local mock node.
//!
//! A minimal HTTP server on `TcpListener` stands in for the Bundlr node
//! (and, where funding is involved, the Solana RPC), so the full flow of
//! balance check, price quote, shortfall funding, credit polling, signing
//! and submission runs end to end with no network and no spend.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use base64::Engine as _;
use serde_json::json;
use sha2::{Digest, Sha256};

use token_maintainer::prelude::*;

// ─── Mock HTTP plumbing ──────────────────────────────────────────────────────

struct Request {
    method: String,
    path: String,
    body: Vec<u8>,
}

fn read_request(stream: &mut TcpStream) -> Option<Request> {
    let mut head = Vec::new();
    let mut byte = [0u8; 1];
    while !head.ends_with(b"\r\n\r\n") {
        if stream.read(&mut byte).ok()? == 0 {
            return None;
        }
        head.push(byte[0]);
    }

    let head = String::from_utf8_lossy(&head).to_string();
    let mut lines = head.lines();
    let mut request_line = lines.next()?.split_whitespace();
    let method = request_line.next()?.to_string();
    let path = request_line.next()?.to_string();

    let content_length = lines
        .filter_map(|l| l.split_once(':'))
        .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, v)| v.trim().parse::<usize>().ok())
        .unwrap_or(0);

    let mut body = vec![0u8; content_length];
    stream.read_exact(&mut body).ok()?;
    Some(Request { method, path, body })
}

fn write_response(stream: &mut TcpStream, status: u16, body: &str) {
    let reason = match status {
        200 => "OK",
        429 => "Too Many Requests",
        _ => "Error",
    };
    let response = format!(
        "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\n\
         Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    let _ = stream.write_all(response.as_bytes());
}

/// Serve `handler` on an ephemeral port; returns the base URL and a log of
/// `"METHOD path"` lines in arrival order.
fn start_server<F>(handler: F) -> (String, Arc<Mutex<Vec<String>>>)
where
    F: Fn(&Request) -> (u16, String) + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind mock server");
    let url = format!("http://{}", listener.local_addr().unwrap());
    let log = Arc::new(Mutex::new(Vec::new()));
    let server_log = log.clone();

    thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(mut stream) = stream else { continue };
            if let Some(request) = read_request(&mut stream) {
                server_log
                    .lock()
                    .unwrap()
                    .push(format!("{} {}", request.method, request.path));
                let (status, body) = handler(&request);
                write_response(&mut stream, status, &body);
            }
        }
    });

    (url, log)
}

/// A mock Bundlr node quoting `price` and reporting `initial_balance`
/// until a funding transfer is registered, `credited_balance` after.
fn start_node(
    price: u64,
    initial_balance: u64,
    credited_balance: u64,
    deposit: Pubkey,
) -> (String, Arc<Mutex<Vec<String>>>) {
    let funded = Arc::new(AtomicBool::new(false));
    start_server(move |req| match (req.method.as_str(), req.path.as_str()) {
        ("GET", path) if path.starts_with("/account/balance/solana") => {
            let balance = if funded.load(Ordering::SeqCst) {
                credited_balance
            } else {
                initial_balance
            };
            (200, format!(r#"{{"balance": "{balance}"}}"#))
        }
        ("GET", path) if path.starts_with("/price/solana/") => (200, price.to_string()),
        ("GET", "/info") => (
            200,
            format!(r#"{{"addresses": {{"solana": "{deposit}"}}}}"#),
        ),
        ("POST", "/account/balance/solana") => {
            funded.store(true, Ordering::SeqCst);
            (200, "{}".to_string())
        }
        ("POST", "/tx/solana") => {
            // id the node derives: sha256 of the item's signature bytes
            let id = URL_SAFE_NO_PAD.encode(Sha256::digest(&req.body[2..66]));
            (200, format!(r#"{{"id": "{id}"}}"#))
        }
        _ => (404, "{}".to_string()),
    })
}

/// A mock Solana RPC that confirms everything it is sent.
fn start_rpc() -> (String, Arc<Mutex<Vec<String>>>) {
    start_server(|req| {
        let request: serde_json::Value = serde_json::from_slice(&req.body).unwrap_or_default();
        let id = request["id"].clone();
        let result = match request["method"].as_str().unwrap_or_default() {
            "getLatestBlockhash" => json!({
                "context": {"slot": 1},
                "value": {
                    "blockhash": "11111111111111111111111111111111",
                    "lastValidBlockHeight": 1000
                }
            }),
            "sendTransaction" => {
                // echo the transaction's own signature back
                let encoded = request["params"][0].as_str().unwrap_or_default();
                let raw = STANDARD
                    .decode(encoded)
                    .or_else(|_| bs58::decode(encoded).into_vec())
                    .unwrap_or_default();
                json!(bs58::encode(&raw[1..65]).into_string())
            }
            "getSignatureStatuses" => json!({
                "context": {"slot": 1},
                "value": [{
                    "slot": 1,
                    "confirmations": null,
                    "err": null,
                    "status": {"Ok": null},
                    "confirmationStatus": "finalized"
                }]
            }),
            "isBlockhashValid" => json!({"context": {"slot": 1}, "value": true}),
            _ => json!(null),
        };
        (
            200,
            json!({"jsonrpc": "2.0", "result": result, "id": id}).to_string(),
        )
    })
}

fn client_for(node_url: &str, rpc_url: &str) -> MaintainerClient {
    MaintainerClient::builder()
        .node_url(node_url)
        .rpc_url(rpc_url)
        .funding_poll_interval(Duration::from_millis(10))
        .funding_poll_attempts(3)
        .build()
        .expect("client should build")
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn upload_funds_exact_shortfall_then_signs_and_submits() {
    let (node_url, log) = start_node(100, 40, 150, Pubkey::new_unique());
    let (rpc_url, _) = start_rpc();
    let client = client_for(&node_url, &rpc_url);

    let keypair = Keypair::new();
    let item = DataItem::new(
        keypair.pubkey(),
        b"{\"name\":\"WL Token\"}".to_vec(),
        vec![Tag::new("Content-Type", "application/json")],
    );

    let outcome = client.upload(&keypair, item).await.expect("upload succeeds");

    assert_eq!(outcome.balance, 40);
    assert_eq!(outcome.price, 100);
    // exactly price - balance, not more
    assert_eq!(outcome.funded, Some(60));
    assert_eq!(outcome.id.len(), 43);
    assert_eq!(outcome.url, format!("https://arweave.net/{}", outcome.id));
    assert_eq!(outcome.receipt.id, outcome.id);

    // step ordering: balance, price, fund (info + register), post-funding
    // balance check, and only then the signed submission
    let log = log.lock().unwrap().clone();
    assert!(log[0].starts_with("GET /account/balance/solana"));
    assert!(log[1].starts_with("GET /price/solana/"));
    assert_eq!(log[2], "GET /info");
    assert_eq!(log[3], "POST /account/balance/solana");
    assert!(log[4].starts_with("GET /account/balance/solana"));
    assert_eq!(log.last().unwrap(), "POST /tx/solana");
}

#[tokio::test]
async fn upload_skips_funding_when_balance_covers_price() {
    let (node_url, log) = start_node(100, 100, 100, Pubkey::new_unique());
    let (rpc_url, rpc_log) = start_rpc();
    let client = client_for(&node_url, &rpc_url);

    let keypair = Keypair::new();
    let item = DataItem::new(keypair.pubkey(), vec![7u8; 64], Vec::new());

    let outcome = client.upload(&keypair, item).await.expect("upload succeeds");

    assert_eq!(outcome.funded, None);
    let log = log.lock().unwrap().clone();
    assert_eq!(log.len(), 3); // balance, price, submit
    assert_eq!(log[2], "POST /tx/solana");
    assert!(rpc_log.lock().unwrap().is_empty());
}

#[tokio::test]
async fn upload_gives_up_when_funding_never_credits() {
    // balance stays below the price no matter what gets registered
    let (node_url, log) = start_node(100, 40, 40, Pubkey::new_unique());
    let (rpc_url, _) = start_rpc();
    let client = client_for(&node_url, &rpc_url);

    let keypair = Keypair::new();
    let item = DataItem::new(keypair.pubkey(), vec![1u8; 32], Vec::new());

    let err = client.upload(&keypair, item).await.unwrap_err();
    assert!(matches!(
        err,
        MaintainerError::Storage(StorageError::FundingNotCredited {
            credited: 40,
            required: 100
        })
    ));

    // never signed, never submitted
    let log = log.lock().unwrap().clone();
    assert!(log.iter().all(|entry| entry != "POST /tx/solana"));
}

#[tokio::test]
async fn rate_limited_balance_lookup_is_retried() {
    let attempts = Arc::new(AtomicUsize::new(0));
    let counter = attempts.clone();
    let (node_url, log) = start_server(move |req| {
        assert!(req.path.starts_with("/account/balance/solana"));
        if counter.fetch_add(1, Ordering::SeqCst) == 0 {
            (429, "slow down".to_string())
        } else {
            (200, r#"{"balance": "7"}"#.to_string())
        }
    });

    let storage = BundlrClient::new(&node_url, DEFAULT_GATEWAY_URL, CURRENCY);
    let balance = storage
        .balance(&Keypair::new().pubkey())
        .await
        .expect("429 should be retried, not surfaced");

    assert_eq!(balance, 7);
    assert_eq!(log.lock().unwrap().len(), 2);
}
