pub mod runtime;
pub mod server;

use std::path::PathBuf;

pub const SOCKET_NAME: &str = "roulette.sock";

/// `$XDG_RUNTIME_DIR/roulette.sock`, or `/tmp/roulette.sock` without one.
pub fn socket_path() -> PathBuf {
    std::env::var_os("XDG_RUNTIME_DIR")
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(std::env::temp_dir)
        .join(SOCKET_NAME)
}
