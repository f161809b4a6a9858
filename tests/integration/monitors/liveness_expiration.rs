use alloy::{
	primitives::{address, Address, Bytes, U256},
	sol_types::SolValue,
};
use chain_liveness_monitor::services::{
	blockchain::BlockChainError,
	monitors::{LivenessExpirationMonitor, Monitor, TickOutcome},
};
use prometheus::Registry;
use tokio::sync::watch;
use tracing_test::traced_test;

use crate::integration::mocks::{
	create_test_header, metric_samples, metric_value, MockEvmClientTrait,
};

const SAFE: Address = address!("1111111111111111111111111111111111111111");
const GUARD: Address = address!("2222222222222222222222222222222222222222");
const MODULE: Address = address!("3333333333333333333333333333333333333333");
const OWNER_A: Address = address!("00000000000000000000000000000000000000aa");
const OWNER_B: Address = address!("00000000000000000000000000000000000000bb");

const GET_OWNERS: [u8; 4] = [0xa0, 0xe6, 0x7e, 0x2b];

/// Answers every call like a healthy Safe with two owners.
fn healthy_client(last_live: u64, interval: u64) -> MockEvmClientTrait {
	let mut client = MockEvmClientTrait::new();
	client
		.expect_get_latest_header()
		.returning(|| Ok(create_test_header(20_000_000, 1_700_000_000)));
	client.expect_call().returning(move |to, data| {
		let encoded = if to == SAFE {
			assert_eq!(&data[..4], &GET_OWNERS);
			vec![OWNER_A, OWNER_B].abi_encode()
		} else if to == GUARD {
			U256::from(last_live).abi_encode()
		} else if to == MODULE {
			U256::from(interval).abi_encode()
		} else {
			panic!("unexpected call to {to}")
		};
		Ok(Bytes::from(encoded))
	});
	client
}

#[tokio::test]
async fn test_liveness_metrics_are_exported() {
	let registry = Registry::new();
	let (_tx, shutdown) = watch::channel(false);

	let mut monitor = LivenessExpirationMonitor::with_client(
		healthy_client(1_699_990_000, 86_400),
		SAFE,
		GUARD,
		MODULE,
		&registry,
	)
	.unwrap();
	assert_eq!(monitor.run(&shutdown).await, TickOutcome::Completed);

	assert_eq!(
		metric_value(
			&registry,
			"liveness_expiration_mon_highestBlockNumber",
			&[("blockNumber", "blockNumber")]
		),
		Some(20_000_000.0)
	);
	assert_eq!(
		metric_value(
			&registry,
			"liveness_expiration_mon_BlockTimestamp",
			&[("blocktimestamp", "blocktimestamp")]
		),
		Some(1_700_000_000.0)
	);
	assert_eq!(
		metric_value(
			&registry,
			"liveness_expiration_mon_intervalLiveness",
			&[("interval", "interval")]
		),
		Some(86_400.0)
	);

	let owners = metric_samples(&registry, "liveness_expiration_mon_lastLiveOfAOwner", &[]);
	assert_eq!(owners.len(), 2);
	let owner_a = OWNER_A.to_string();
	assert_eq!(
		metric_value(
			&registry,
			"liveness_expiration_mon_lastLiveOfAOwner",
			&[("address", owner_a.as_str())]
		),
		Some(1_699_990_000.0)
	);
}

#[tokio::test]
#[traced_test]
async fn test_expired_owner_is_logged() {
	let registry = Registry::new();
	let (_tx, shutdown) = watch::channel(false);

	let mut monitor = LivenessExpirationMonitor::with_client(
		healthy_client(1_000, 60),
		SAFE,
		GUARD,
		MODULE,
		&registry,
	)
	.unwrap();
	assert_eq!(monitor.run(&shutdown).await, TickOutcome::Completed);
	assert!(logs_contain("owner liveness expired"));
}

#[tokio::test]
async fn test_failed_read_emits_nothing() {
	let registry = Registry::new();
	let (_tx, shutdown) = watch::channel(false);

	let mut client = MockEvmClientTrait::new();
	client
		.expect_get_latest_header()
		.returning(|| Ok(create_test_header(1, 1)));
	client.expect_call().returning(|to, _| {
		if to == SAFE {
			Ok(Bytes::from(vec![OWNER_A].abi_encode()))
		} else {
			Err(BlockChainError::request_error("execution reverted"))
		}
	});

	let mut monitor =
		LivenessExpirationMonitor::with_client(client, SAFE, GUARD, MODULE, &registry).unwrap();
	assert_eq!(monitor.run(&shutdown).await, TickOutcome::Failed);

	assert_eq!(
		metric_value(
			&registry,
			"liveness_expiration_mon_unexpectedRpcErrors",
			&[("stage", "l1"), ("operation", "LastLive")]
		),
		Some(1.0)
	);
	assert!(metric_samples(&registry, "liveness_expiration_mon_highestBlockNumber", &[]).is_empty());
	assert!(metric_samples(&registry, "liveness_expiration_mon_lastLiveOfAOwner", &[]).is_empty());
}

#[tokio::test]
async fn test_undecodable_owners_counts_get_owners() {
	let registry = Registry::new();
	let (_tx, shutdown) = watch::channel(false);

	let mut client = MockEvmClientTrait::new();
	client
		.expect_get_latest_header()
		.returning(|| Ok(create_test_header(1, 1)));
	client
		.expect_call()
		.times(1)
		.returning(|_, _| Ok(Bytes::from(vec![0x01, 0x02])));

	let mut monitor =
		LivenessExpirationMonitor::with_client(client, SAFE, GUARD, MODULE, &registry).unwrap();
	assert_eq!(monitor.run(&shutdown).await, TickOutcome::Failed);
	assert_eq!(
		monitor
			.metrics()
			.unexpected_rpc_errors
			.with_label_values(&["l1", "GetOwners"])
			.get(),
		1.0
	);
}
