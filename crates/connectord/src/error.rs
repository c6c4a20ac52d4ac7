use core_chainbase::ChainbaseError;
use snafu::prelude::*;

#[derive(Snafu, Debug)]
#[snafu(visibility(pub(crate)))]
pub enum ConnectorError {
    #[snafu(display("Failed to create chainbase client: {source}"))]
    Client { source: ChainbaseError },

    #[snafu(display("Failed to bind to {addr}: {source}"))]
    Bind {
        addr: String,
        source: std::io::Error,
    },

    #[snafu(display("Server failed: {source}"))]
    Serve { source: std::io::Error },
}

pub type ConnectorResult<T> = Result<T, ConnectorError>;
