use std::net::{IpAddr, SocketAddr};
use std::path::Path;

use todos::db::Store;
use todos::web::{self, ServerConfig};

pub struct ServeOptions {
    pub host: IpAddr,
    pub port: u16,
    pub cors: bool,
    pub max_body_bytes: Option<usize>,
    pub public_url: String,
}

pub fn run(db_path: &Path, opts: ServeOptions) -> Result<(), String> {
    let config = ServerConfig {
        bind_addr: SocketAddr::new(opts.host, opts.port),
        cors_permissive: opts.cors,
        max_body_bytes: opts.max_body_bytes,
        public_url: opts.public_url,
    };
    let store = Store::new(db_path);

    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| format!("failed to start async runtime: {e}"))?;
    runtime.block_on(web::serve(store, &config))
}
