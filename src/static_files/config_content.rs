use crate::server::config::{DEFAULT_ADDRESS, DEFAULT_PORT};

pub fn get_config() -> String {
    format!(
        "[Server]
IP={}
Port={}
",
        DEFAULT_ADDRESS, DEFAULT_PORT
    )
}
