/// Failures the monitoring cycle can run into.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("peripheral unavailable: {0}")]
    PeripheralUnavailable(String),

    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("wireless association still pending after {attempts} polls")]
    WirelessAssociationPending { attempts: u32 },
}

pub type Result<T> = core::result::Result<T, Error>;
