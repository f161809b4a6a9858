use proptest::prelude::*;

/// A parameter as an operator could write it.
#[derive(Debug, Clone)]
pub struct DecoratedParam {
	pub ty: String,
	pub indexed: bool,
	pub name: Option<String>,
}

impl DecoratedParam {
	pub fn render(&self, padding: &str) -> String {
		let mut out = self.ty.clone();
		if self.indexed {
			out.push_str(" indexed");
		}
		if let Some(name) = &self.name {
			out.push(' ');
			out.push_str(name);
		}
		format!("{padding}{out}{padding}")
	}
}

pub fn elementary_type() -> impl Strategy<Value = String> {
	prop_oneof![
		Just("address".to_string()),
		Just("bool".to_string()),
		Just("string".to_string()),
		Just("bytes".to_string()),
		Just("bytes32".to_string()),
		Just("uint256".to_string()),
		Just("int8".to_string()),
		Just("uint256[]".to_string()),
		Just("address[2]".to_string()),
	]
}

pub fn param_strategy() -> impl Strategy<Value = DecoratedParam> {
	(
		elementary_type(),
		any::<bool>(),
		proptest::option::of("[a-z][a-zA-Z0-9_]{0,8}"),
	)
		.prop_map(|(ty, indexed, name)| DecoratedParam { ty, indexed, name })
}

prop_compose! {
	/// `(decorated, bare)` pair of the same event signature.
	pub fn signature_pair()(
		name in "[A-Z][a-zA-Z0-9_]{0,15}",
		params in prop::collection::vec(param_strategy(), 0..6),
		padding in prop_oneof![Just(""), Just(" "), Just("  ")],
	) -> (String, String) {
		let decorated = params
			.iter()
			.map(|param| param.render(padding))
			.collect::<Vec<_>>()
			.join(",");
		let bare = params
			.iter()
			.map(|param| param.ty.as_str())
			.collect::<Vec<_>>()
			.join(",");
		(format!("{name}({decorated})"), format!("{name}({bare})"))
	}
}
