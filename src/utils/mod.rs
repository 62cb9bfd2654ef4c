pub mod build_info;

use tracing_subscriber::{filter::Directive, fmt, EnvFilter};

const DEFAULT_DIRECTIVE: &str = "budget_spread=info";

/// Installs the global fmt subscriber, honouring `RUST_LOG` on top of the default directive.
///
/// Only the first installed subscriber wins; later calls are no-ops.
pub fn init_tracing() {
    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = DEFAULT_DIRECTIVE.parse::<Directive>() {
        filter = filter.add_directive(directive);
    }
    // Another subscriber may already be installed by the host application.
    let _ = fmt().with_env_filter(filter).try_init();
}
