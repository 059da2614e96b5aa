//! List command - prints registered triples.

use crate::registry::ToolchainSpec;

/// Print each registered triple, one per line, in registry order.
///
/// Takes no engine: listing never touches containers.
pub fn cmd_list(specs: &[ToolchainSpec]) {
    for spec in specs {
        println!("{}", spec.triple);
    }
}
