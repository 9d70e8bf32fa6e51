//! JSON-RPC method dispatch
//!
//! Maps wire methods onto `MockService` operations. Parameter and result
//! shapes are the protocol contract conformance clients code against.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::error::{ServiceError, ServiceResult};
use super::mock_service::MockService;

#[derive(Deserialize)]
struct OpenSessionParams {
    algorithm: String,
    #[serde(default)]
    input: Vec<u8>,
}

#[derive(Serialize)]
struct OpenSessionResult {
    session: String,
    output: Vec<u8>,
}

#[derive(Deserialize)]
struct CloseSessionParams {
    session: String,
}

#[derive(Deserialize)]
struct SearchItemsParams {
    #[serde(default)]
    attributes: HashMap<String, String>,
}

#[derive(Deserialize)]
struct GetSecretParams {
    session: String,
    item: String,
}

#[derive(Deserialize)]
struct SetSecretParams {
    session: String,
    item: String,
    value: Vec<u8>,
}

#[derive(Deserialize)]
struct LockParams {
    paths: Vec<String>,
}

#[derive(Deserialize)]
struct ReadAliasParams {
    name: String,
}

impl MockService {
    /// Handle one decoded request, producing the JSON result value
    ///
    /// Errors are converted to JSON-RPC error objects by the server loop
    /// using `ServiceError::jsonrpc_code`.
    pub fn dispatch(&self, method: &str, params: Value) -> ServiceResult<Value> {
        match method {
            "lifecycle/ping" => Ok(json!({ "ok": true })),

            "service/open_session" => {
                let p: OpenSessionParams = serde_json::from_value(params)?;
                let (session, output) = self.open_session(&p.algorithm, &p.input)?;
                Ok(serde_json::to_value(OpenSessionResult { session, output })?)
            }

            "service/close_session" => {
                let p: CloseSessionParams = serde_json::from_value(params)?;
                Ok(json!({ "closed": self.close_session(&p.session) }))
            }

            "service/search_items" => {
                let p: SearchItemsParams = serde_json::from_value(params)?;
                Ok(serde_json::to_value(self.search_items(&p.attributes))?)
            }

            "service/get_secret" => {
                let p: GetSecretParams = serde_json::from_value(params)?;
                let value = self.get_secret(&p.session, &p.item)?;
                Ok(json!({ "value": value }))
            }

            "service/set_secret" => {
                let p: SetSecretParams = serde_json::from_value(params)?;
                self.set_secret(&p.session, &p.item, &p.value)?;
                Ok(json!({ "ok": true }))
            }

            "service/lock" => {
                let p: LockParams = serde_json::from_value(params)?;
                Ok(json!({ "changed": self.lock(&p.paths) }))
            }

            "service/unlock" => {
                let p: LockParams = serde_json::from_value(params)?;
                Ok(json!({ "changed": self.unlock(&p.paths) }))
            }

            "service/list_collections" => {
                Ok(json!({ "collections": self.collection_paths() }))
            }

            "service/read_alias" => {
                let p: ReadAliasParams = serde_json::from_value(params)?;
                Ok(json!({ "collection": self.read_alias(&p.name) }))
            }

            other => Err(ServiceError::UnknownMethod(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::algorithms::{AlgorithmHandler, AlgorithmRegistry, PlainAlgorithm};

    fn configured_service() -> MockService {
        let service = MockService::new();
        service.add_standard_objects();

        let mut registry = AlgorithmRegistry::new();
        let mut table: HashMap<String, Arc<dyn AlgorithmHandler>> = HashMap::new();
        table.insert("plain".to_string(), Arc::new(PlainAlgorithm::new()));
        registry.set(table);
        service.set_algorithms(registry);
        service
    }

    #[test]
    fn test_dispatch_ping() {
        let service = configured_service();
        let result = service.dispatch("lifecycle/ping", json!({})).unwrap();
        assert_eq!(result, json!({ "ok": true }));
    }

    #[test]
    fn test_dispatch_open_session_and_get_secret() {
        let service = configured_service();

        let opened = service
            .dispatch("service/open_session", json!({ "algorithm": "plain" }))
            .unwrap();
        let session = opened["session"].as_str().unwrap().to_string();
        assert!(opened["output"].as_array().unwrap().is_empty());

        let got = service
            .dispatch(
                "service/get_secret",
                json!({ "session": session, "item": "/collections/english/item_one" }),
            )
            .unwrap();
        let value: Vec<u8> = serde_json::from_value(got["value"].clone()).unwrap();
        assert_eq!(value, b"111");
    }

    #[test]
    fn test_dispatch_unknown_algorithm_code() {
        let service = configured_service();
        let err = service
            .dispatch("service/open_session", json!({ "algorithm": "aes" }))
            .unwrap_err();
        assert_eq!(err.jsonrpc_code(), -32001);
    }

    #[test]
    fn test_dispatch_unknown_method_code() {
        let service = configured_service();
        let err = service.dispatch("service/frobnicate", json!({})).unwrap_err();
        assert_eq!(err.jsonrpc_code(), -32601);
    }

    #[test]
    fn test_dispatch_invalid_params_code() {
        let service = configured_service();
        let err = service
            .dispatch("service/open_session", json!({ "input": [1, 2] }))
            .unwrap_err();
        assert_eq!(err.jsonrpc_code(), -32602);
    }

    #[test]
    fn test_dispatch_search_items() {
        let service = configured_service();
        let result = service
            .dispatch(
                "service/search_items",
                json!({ "attributes": { "number": "2" } }),
            )
            .unwrap();
        assert_eq!(
            result["unlocked"],
            json!(["/collections/english/item_two"])
        );
        assert_eq!(result["locked"], json!(["/collections/spanish/item_dos"]));
    }

    #[test]
    fn test_dispatch_read_alias() {
        let service = configured_service();
        let result = service
            .dispatch("service/read_alias", json!({ "name": "default" }))
            .unwrap();
        assert_eq!(result["collection"], json!("/collections/english"));

        let unset = service
            .dispatch("service/read_alias", json!({ "name": "session" }))
            .unwrap();
        assert_eq!(unset["collection"], Value::Null);
    }
}
