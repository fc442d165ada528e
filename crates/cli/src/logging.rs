use tracing_subscriber::EnvFilter;

/// Installs the stderr subscriber.
///
/// `RUST_LOG` takes precedence; otherwise verbosity picks the level for the
/// `franka_desk` targets and everything else stays at `warn`.
pub fn init_logging(verbose: u8) {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

	let _ = tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(verbose >= 2)
		.try_init();
}

fn default_directive(verbose: u8) -> String {
	let level = match verbose {
		0 => return "warn".to_string(),
		1 => "info",
		2 => "debug",
		_ => "trace",
	};
	format!("warn,franka_desk={level}")
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn verbosity_maps_to_levels() {
		assert_eq!(default_directive(0), "warn");
		assert_eq!(default_directive(1), "warn,franka_desk=info");
		assert_eq!(default_directive(2), "warn,franka_desk=debug");
		assert_eq!(default_directive(7), "warn,franka_desk=trace");
	}
}
