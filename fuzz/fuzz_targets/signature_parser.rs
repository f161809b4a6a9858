#![no_main]

use chain_liveness_monitor::services::signature::canonicalize;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
	// A canonical form must parse back to itself.
	if let Ok(canonical) = canonicalize(data) {
		let again = canonicalize(canonical.as_str()).expect("canonical form must parse");
		assert_eq!(again, canonical);
	}
});
