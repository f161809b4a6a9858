use std::time::Duration;

use alloy::primitives::{address, bytes, Bytes};
use chain_liveness_monitor::services::blockchain::{
	BlockChainClient, BlockChainError, EvmClient, EvmClientTrait,
};
use mockall::predicate;
use mockito::{Matcher, Mock, ServerGuard};
use serde_json::{json, Value};

use crate::integration::mocks::MockEVMTransportClient;

const TIMEOUT: Duration = Duration::from_secs(5);

/// Answers `method` with `result`, echoing the request id.
async fn mock_rpc(server: &mut ServerGuard, method: &str, result: Value) -> Mock {
	server
		.mock("POST", "/")
		.match_body(Matcher::PartialJson(json!({ "method": method })))
		.with_header("content-type", "application/json")
		.with_body_from_request(move |request| {
			let body: Value = serde_json::from_slice(request.body().unwrap()).unwrap();
			serde_json::to_vec(&json!({
				"jsonrpc": "2.0",
				"id": body["id"],
				"result": result.clone()
			}))
			.unwrap()
		})
		.create_async()
		.await
}

fn client_with_transport(transport: MockEVMTransportClient) -> EvmClient<MockEVMTransportClient> {
	EvmClient::new_with_transport(transport)
}

#[tokio::test]
async fn test_new_checks_the_node() {
	let mut server = mockito::Server::new_async().await;
	let handshake = mock_rpc(&mut server, "net_version", json!("1")).await;
	let block_number = mock_rpc(&mut server, "eth_blockNumber", json!("0x12a05f2")).await;

	let client = EvmClient::new(&server.url(), TIMEOUT).await.unwrap();
	assert_eq!(client.get_latest_block_number().await.unwrap(), 19_531_250);

	handshake.assert_async().await;
	block_number.assert_async().await;
}

#[tokio::test]
async fn test_new_fails_when_connectivity_check_fails() {
	let mut server = mockito::Server::new_async().await;
	let handshake = server
		.mock("POST", "/")
		.with_status(500)
		.create_async()
		.await;

	let result = EvmClient::new(&server.url(), TIMEOUT).await;
	match result {
		Err(BlockChainError::ConnectionError(msg)) => {
			assert!(msg.contains("Failed to connect"));
		}
		_ => panic!("expected a connection error"),
	}
	handshake.assert_async().await;
}

#[tokio::test]
async fn test_new_rejects_invalid_url() {
	let result = EvmClient::new("not a url", TIMEOUT).await;
	assert!(matches!(result, Err(BlockChainError::ConnectionError(_))));
}

#[tokio::test]
async fn test_get_latest_header_over_http() {
	let mut server = mockito::Server::new_async().await;
	mock_rpc(&mut server, "net_version", json!("1")).await;
	let header = mock_rpc(
		&mut server,
		"eth_getBlockByNumber",
		json!({
			"number": "0x10",
			"timestamp": "0x65f0a0c0",
			"hash": "0xdc0818cf78f21a8e70579cb46a43643f78291264dda342ae31049421c82d21ae",
			"transactions": []
		}),
	)
	.await;

	let client = EvmClient::new(&server.url(), TIMEOUT).await.unwrap();
	let latest = client.get_latest_header().await.unwrap();

	assert_eq!(latest.number, 16);
	assert_eq!(latest.timestamp, 0x65f0a0c0);
	header.assert_async().await;
}

#[tokio::test]
async fn test_json_rpc_error_is_a_request_error() {
	let mut server = mockito::Server::new_async().await;
	mock_rpc(&mut server, "net_version", json!("1")).await;
	server
		.mock("POST", "/")
		.match_body(Matcher::PartialJson(json!({ "method": "eth_getLogs" })))
		.with_header("content-type", "application/json")
		.with_body_from_request(|request| {
			let body: Value = serde_json::from_slice(request.body().unwrap()).unwrap();
			serde_json::to_vec(&json!({
				"jsonrpc": "2.0",
				"id": body["id"],
				"error": { "code": -32005, "message": "query returned more than 10000 results" }
			}))
			.unwrap()
		})
		.create_async()
		.await;

	let client = EvmClient::new(&server.url(), TIMEOUT).await.unwrap();
	let result = client.get_logs_for_blocks(1, 1, vec![]).await;

	assert!(matches!(result, Err(BlockChainError::RequestError(_))));
}

#[tokio::test]
async fn test_get_logs_without_addresses_omits_filter() {
	let mut transport = MockEVMTransportClient::new();
	transport
		.expect_send_raw_request()
		.with(
			predicate::eq("eth_getLogs"),
			predicate::eq(Some(json!([{ "fromBlock": "0x64", "toBlock": "0x64" }]))),
		)
		.times(1)
		.returning(|_, _| {
			Ok(json!([{
				"address": "0xbeb5fc579115071764c7423a4f12edde41f106ed",
				"topics": ["0xddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef"],
				"data": "0x",
				"blockNumber": "0x64",
				"logIndex": "0x0"
			}]))
		});

	let logs = client_with_transport(transport)
		.get_logs_for_blocks(100, 100, vec![])
		.await
		.unwrap();

	assert_eq!(logs.len(), 1);
	assert_eq!(
		logs[0].address,
		address!("beb5fc579115071764c7423a4f12edde41f106ed")
	);
	assert_eq!(logs[0].block_number, Some(100));
}

#[tokio::test]
async fn test_get_logs_with_addresses_sets_filter() {
	let watched = address!("beb5fc579115071764c7423a4f12edde41f106ed");
	let mut transport = MockEVMTransportClient::new();
	transport
		.expect_send_raw_request()
		.with(
			predicate::eq("eth_getLogs"),
			predicate::function(move |params: &Option<Value>| {
				let filter = &params.as_ref().unwrap()[0];
				filter["fromBlock"] == "0xa"
					&& filter["toBlock"] == "0xa"
					&& filter["address"] == json!([watched])
			}),
		)
		.times(1)
		.returning(|_, _| Ok(json!([])));

	let logs = client_with_transport(transport)
		.get_logs_for_blocks(10, 10, vec![watched])
		.await
		.unwrap();
	assert!(logs.is_empty());
}

#[tokio::test]
async fn test_call_targets_latest_block() {
	let target = address!("1111111111111111111111111111111111111111");
	let mut transport = MockEVMTransportClient::new();
	transport
		.expect_send_raw_request()
		.with(
			predicate::eq("eth_call"),
			predicate::eq(Some(json!([
				{ "to": target, "data": "0xa0e67e2b" },
				"latest"
			]))),
		)
		.times(1)
		.returning(|_, _| Ok(json!("0x0000000000000000000000000000000000000000000000000000000000000001")));

	let output = client_with_transport(transport)
		.call(target, bytes!("a0e67e2b"))
		.await
		.unwrap();

	assert_eq!(output.len(), 32);
	assert_eq!(output[31], 1);
}

#[tokio::test]
async fn test_get_chain_id_parses_quantity() {
	let mut transport = MockEVMTransportClient::new();
	transport
		.expect_send_raw_request()
		.with(predicate::eq("eth_chainId"), predicate::eq(Some(json!([]))))
		.times(1)
		.returning(|_, _| Ok(json!("0xaa36a7")));

	let chain_id = client_with_transport(transport).get_chain_id().await.unwrap();
	assert_eq!(chain_id, 11_155_111);
}

#[tokio::test]
async fn test_null_header_is_a_request_error() {
	let mut transport = MockEVMTransportClient::new();
	transport
		.expect_send_raw_request()
		.with(
			predicate::eq("eth_getBlockByNumber"),
			predicate::eq(Some(json!(["latest", false]))),
		)
		.times(1)
		.returning(|_, _| Ok(Value::Null));

	let result = client_with_transport(transport).get_latest_header().await;
	match result {
		Err(BlockChainError::RequestError(msg)) => assert!(msg.contains("returned null")),
		_ => panic!("expected a request error"),
	}
}

#[tokio::test]
async fn test_malformed_quantity_is_a_request_error() {
	let mut transport = MockEVMTransportClient::new();
	transport
		.expect_send_raw_request()
		.returning(|_, _| Ok(json!("not-hex")));

	let result = client_with_transport(transport).get_latest_block_number().await;
	assert!(matches!(result, Err(BlockChainError::RequestError(_))));
}

#[tokio::test]
async fn test_transport_errors_propagate() {
	let mut transport = MockEVMTransportClient::new();
	transport
		.expect_send_raw_request()
		.returning(|_, _| Err(BlockChainError::timeout_error("eth_call", Duration::from_secs(1))));

	let result = client_with_transport(transport)
		.call(address!("1111111111111111111111111111111111111111"), Bytes::new())
		.await;
	assert!(matches!(result, Err(BlockChainError::TimeoutError { .. })));
}
