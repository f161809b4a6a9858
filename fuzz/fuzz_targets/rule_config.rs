#![no_main]

use std::io::Write;

use chain_liveness_monitor::models::{ConfigLoader, RuleSet};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
	let Ok(mut file) = tempfile::Builder::new().suffix(".yaml").tempfile() else {
		return;
	};
	if file.write_all(data.as_bytes()).is_err() {
		return;
	}
	let _ = RuleSet::load_from_path(file.path());
});
