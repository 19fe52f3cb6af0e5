pub mod server;

use crate::gate::GateConfig;

/// Actions the CLI can dispatch to.
#[derive(Debug)]
pub enum Action {
    Server { port: u16, config: GateConfig },
}
