//! End-to-end conformance pass over the Unix socket
//!
//! Runs the service on a runtime thread and drives it with the blocking
//! client, the way an external conformance suite would.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde_json::{json, Value};
use tempfile::TempDir;

use secret_mock_core::{
    AlgorithmHandler, AlgorithmRegistry, ClientError, MockClient, MockService, PlainAlgorithm,
};

struct Harness {
    service: MockService,
    client: MockClient,
    socket_path: PathBuf,
    // Held for their drop side effects: runtime teardown, tempdir removal
    _runtime: tokio::runtime::Runtime,
    _dir: TempDir,
}

impl Drop for Harness {
    fn drop(&mut self) {
        self.service.shutdown();
    }
}

fn start_service() -> Harness {
    let dir = tempfile::tempdir().expect("tempdir");
    let socket_path: PathBuf = dir.path().join("mock.sock");

    let service = MockService::new();
    service.add_standard_objects();

    let mut registry = AlgorithmRegistry::new();
    let mut table: HashMap<String, Arc<dyn AlgorithmHandler>> = HashMap::new();
    table.insert("plain".to_string(), Arc::new(PlainAlgorithm::new()));
    registry.set(table);
    service.set_algorithms(registry);

    let runtime = tokio::runtime::Runtime::new().expect("runtime");
    let listener = service.clone();
    let listen_path = socket_path.clone();
    runtime.spawn(async move {
        listener.listen(&listen_path).await.expect("listen");
    });

    // Wait for the socket to appear
    let deadline = Instant::now() + Duration::from_secs(5);
    while !socket_path.exists() {
        assert!(Instant::now() < deadline, "service never bound its socket");
        std::thread::sleep(Duration::from_millis(10));
    }

    let client = MockClient::new(socket_path.to_string_lossy().to_string());
    Harness {
        service,
        client,
        socket_path,
        _runtime: runtime,
        _dir: dir,
    }
}

fn open_plain_session(client: &MockClient) -> String {
    let opened: Value = client
        .call("service/open_session", json!({ "algorithm": "plain" }))
        .expect("open_session");
    assert!(opened["output"].as_array().expect("output array").is_empty());
    opened["session"].as_str().expect("session path").to_string()
}

#[test]
fn ping_and_open_plain_session() {
    let harness = start_service();
    assert!(harness.client.ping().expect("ping"));

    let session = open_plain_session(&harness.client);
    assert!(session.starts_with("/sessions/"));

    let closed: Value = harness
        .client
        .call("service/close_session", json!({ "session": session }))
        .expect("close_session");
    assert_eq!(closed["closed"], json!(true));
}

#[test]
fn search_and_get_secret() {
    let harness = start_service();
    let session = open_plain_session(&harness.client);

    let found: Value = harness
        .client
        .call(
            "service/search_items",
            json!({ "attributes": { "number": "2" } }),
        )
        .expect("search_items");
    assert_eq!(found["unlocked"], json!(["/collections/english/item_two"]));
    assert_eq!(found["locked"], json!(["/collections/spanish/item_dos"]));

    let got: Value = harness
        .client
        .call(
            "service/get_secret",
            json!({ "session": session, "item": "/collections/english/item_two" }),
        )
        .expect("get_secret");
    let value: Vec<u8> = serde_json::from_value(got["value"].clone()).expect("value bytes");
    assert_eq!(value, b"222");
}

#[test]
fn set_secret_round_trips() {
    let harness = start_service();
    let session = open_plain_session(&harness.client);
    let item = "/collections/english/item_one";

    let set: Value = harness
        .client
        .call(
            "service/set_secret",
            json!({ "session": session, "item": item, "value": b"rewritten".to_vec() }),
        )
        .expect("set_secret");
    assert_eq!(set["ok"], json!(true));

    let got: Value = harness
        .client
        .call(
            "service/get_secret",
            json!({ "session": session, "item": item }),
        )
        .expect("get_secret");
    let value: Vec<u8> = serde_json::from_value(got["value"].clone()).expect("value bytes");
    assert_eq!(value, b"rewritten");
}

#[test]
fn set_secret_locked_item_is_rejected() {
    let harness = start_service();
    let session = open_plain_session(&harness.client);
    let item = "/collections/spanish/item_uno";

    let result: Result<Value, _> = harness.client.call(
        "service/set_secret",
        json!({ "session": session, "item": item, "value": b"overwritten".to_vec() }),
    );
    match result {
        Err(ClientError::Rpc { code, .. }) => assert_eq!(code, -32003),
        other => panic!("expected -32003, got {:?}", other),
    }

    // The rejected write must not have changed the stored value
    let unlocked: Value = harness
        .client
        .call(
            "service/unlock",
            json!({ "paths": ["/collections/spanish"] }),
        )
        .expect("unlock");
    assert_eq!(unlocked["changed"], json!(["/collections/spanish"]));

    let got: Value = harness
        .client
        .call(
            "service/get_secret",
            json!({ "session": session, "item": item }),
        )
        .expect("get_secret after unlock");
    let value: Vec<u8> = serde_json::from_value(got["value"].clone()).expect("value bytes");
    assert_eq!(value, b"uno");
}

#[test]
fn unknown_algorithm_is_rejected() {
    let harness = start_service();

    let result: Result<Value, _> = harness
        .client
        .call("service/open_session", json!({ "algorithm": "aes" }));

    match result {
        Err(ClientError::Rpc { code, message }) => {
            assert_eq!(code, -32001);
            assert!(message.contains("aes"), "message was: {}", message);
        }
        other => panic!("expected -32001, got {:?}", other),
    }
}

#[test]
fn locked_item_until_unlocked() {
    let harness = start_service();
    let session = open_plain_session(&harness.client);
    let item = "/collections/spanish/item_uno";

    let result: Result<Value, _> = harness.client.call(
        "service/get_secret",
        json!({ "session": session, "item": item }),
    );
    match result {
        Err(ClientError::Rpc { code, .. }) => assert_eq!(code, -32003),
        other => panic!("expected -32003, got {:?}", other),
    }

    let unlocked: Value = harness
        .client
        .call(
            "service/unlock",
            json!({ "paths": ["/collections/spanish"] }),
        )
        .expect("unlock");
    assert_eq!(unlocked["changed"], json!(["/collections/spanish"]));

    let got: Value = harness
        .client
        .call(
            "service/get_secret",
            json!({ "session": session, "item": item }),
        )
        .expect("get_secret after unlock");
    let value: Vec<u8> = serde_json::from_value(got["value"].clone()).expect("value bytes");
    assert_eq!(value, b"uno");
}

#[test]
fn aliases_and_collections() {
    let harness = start_service();

    let collections: Value = harness
        .client
        .call("service/list_collections", json!({}))
        .expect("list_collections");
    assert_eq!(
        collections["collections"],
        json!(["/collections/english", "/collections/spanish"])
    );

    let alias: Value = harness
        .client
        .call("service/read_alias", json!({ "name": "default" }))
        .expect("read_alias");
    assert_eq!(alias["collection"], json!("/collections/english"));
}

#[test]
fn oversized_frame_drops_the_connection() {
    use std::io::{Read, Write};
    use std::os::unix::net::UnixStream;

    let harness = start_service();

    // Claim a body far past the server's frame limit without sending one
    let mut stream = UnixStream::connect(&harness.socket_path).expect("connect");
    stream
        .set_read_timeout(Some(Duration::from_secs(5)))
        .expect("timeout");
    stream
        .write_all(b"Content-Length: 1099511627776\r\n\r\n")
        .expect("write header");

    // The server hangs up instead of allocating for the claimed length
    let mut buf = [0u8; 1];
    assert_eq!(stream.read(&mut buf).expect("read"), 0);

    // And keeps serving well-formed clients
    assert!(harness.client.ping().expect("ping after oversized frame"));
}

#[test]
fn unknown_method_is_rejected() {
    let harness = start_service();

    let result: Result<Value, _> = harness.client.call("service/frobnicate", json!({}));
    match result {
        Err(ClientError::Rpc { code, .. }) => assert_eq!(code, -32601),
        other => panic!("expected -32601, got {:?}", other),
    }
}
