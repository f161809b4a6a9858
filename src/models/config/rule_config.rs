//! Rule configuration loading and validation.
//!
//! Rule files are YAML documents with a top-level `configuration` list:
//!
//! ```yaml
//! configuration:
//!   - name: "Safe owner changes"
//!     priority: "P1"
//!     addresses:
//!       - "0x9BA6e03D8B90dE867373Db8cF1A58d2F7F006b3A"
//!     events:
//!       - signature: "AddedOwner(address owner)"
//!       - signature: "RemovedOwner(address owner)"
//! ```

use std::{
	collections::{BTreeMap, HashSet},
	fs,
	path::Path,
	str::FromStr,
};

use alloy::primitives::Address;
use config::{Config, File, FileFormat};
use serde::Deserialize;

use crate::{
	models::{config::error::ConfigError, ConfigLoader, EventEntry, Rule, RuleSet},
	services::signature::canonicalize,
	utils::constants::DEFAULT_RULES_PATH,
};

/// Rule as written in YAML, before addresses are parsed.
#[derive(Debug, Deserialize)]
struct RawRule {
	name: String,
	priority: String,
	#[serde(default)]
	addresses: Vec<String>,
	#[serde(default)]
	events: Vec<EventEntry>,
}

impl RawRule {
	fn into_rule(self) -> Result<Rule, ConfigError> {
		let addresses = self
			.addresses
			.iter()
			.map(|address| {
				Address::from_str(address.trim()).map_err(|e| {
					ConfigError::validation_error(format!(
						"Rule '{}' has an invalid address '{}': {}",
						self.name, address, e
					))
				})
			})
			.collect::<Result<Vec<_>, _>>()?;

		Ok(Rule {
			name: self.name,
			priority: self.priority,
			addresses,
			events: self.events,
		})
	}
}

impl ConfigLoader for RuleSet {
	/// Load every rule file under `path`
	///
	/// A file path yields a single entry; a directory yields one entry per
	/// `*.yaml`/`*.yml` file, keyed by file name.
	fn load_all<T>(path: Option<&Path>) -> Result<T, ConfigError>
	where
		T: FromIterator<(String, Self)>,
	{
		let rules_path = path.unwrap_or(Path::new(DEFAULT_RULES_PATH));

		if !rules_path.exists() {
			return Err(ConfigError::file_error(format!(
				"rules path not found: {}",
				rules_path.display()
			)));
		}

		let files = if rules_path.is_dir() {
			let mut files = Vec::new();
			for entry in fs::read_dir(rules_path)? {
				let path = entry?.path();
				if path.is_file() && Self::is_yaml_file(&path) {
					files.push(path);
				}
			}
			files
		} else {
			vec![rules_path.to_path_buf()]
		};

		let mut pairs = Vec::with_capacity(files.len());
		for file in files {
			let name = file
				.file_name()
				.and_then(|s| s.to_str())
				.unwrap_or("unknown")
				.to_string();
			pairs.push((name, Self::load_from_path(&file)?));
		}

		Ok(T::from_iter(pairs))
	}

	/// Load a rule set from a single YAML file
	fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
		if !Self::is_yaml_file(path) {
			return Err(ConfigError::file_error(format!(
				"rule file must have a .yaml or .yml extension: {}",
				path.display()
			)));
		}

		let contents = fs::read_to_string(path)?;
		let config = Config::builder()
			.add_source(File::from_str(&contents, FileFormat::Yaml))
			.build()?;

		let rules = config
			.get::<Vec<RawRule>>("configuration")?
			.into_iter()
			.map(RawRule::into_rule)
			.collect::<Result<Vec<_>, _>>()?;

		let rule_set = RuleSet::new(rules);
		rule_set.validate()?;

		Ok(rule_set)
	}

	/// Validate the rule set
	///
	/// Every signature is canonicalized here so that a malformed entry stops
	/// the process before the first tick.
	fn validate(&self) -> Result<(), ConfigError> {
		let mut names = HashSet::new();

		for rule in self.rules() {
			if rule.name.trim().is_empty() {
				return Err(ConfigError::validation_error("Rule name is required"));
			}

			if !names.insert(rule.name.as_str()) {
				return Err(ConfigError::validation_error(format!(
					"Duplicate rule name: {}",
					rule.name
				)));
			}

			if rule.events.is_empty() {
				return Err(ConfigError::validation_error(format!(
					"Rule '{}' must list at least one event",
					rule.name
				)));
			}

			for event in &rule.events {
				canonicalize(&event.signature)?;
			}
		}

		Ok(())
	}
}

impl RuleSet {
	/// Load rules from a file or from every YAML file of a directory.
	///
	/// Files are merged in file-name order and the result is validated as a
	/// whole, so rule names must be unique across files. A path that yields no
	/// rule at all is rejected.
	pub fn load(path: &Path) -> Result<Self, ConfigError> {
		let files: BTreeMap<String, RuleSet> = Self::load_all(Some(path))?;

		let mut rule_set = RuleSet::default();
		for (_, rules) in files {
			rule_set.extend(rules);
		}
		if rule_set.is_empty() {
			return Err(ConfigError::file_error(format!(
				"no rules found under {}",
				path.display()
			)));
		}
		rule_set.validate()?;

		Ok(rule_set)
	}
}
