// NVH Monitor — Wireless Association
//
// Station-mode association is started by the firmware; this polls until the
// link reports connected and re-issues the connect request while it is down,
// since the station does not retry on its own after a failed attempt.

use std::time::Duration;

use crate::config::REASSOCIATE_EVERY_POLLS;
use crate::error::{Error, Result};
use crate::monitor::Delay;

pub trait WirelessLink {
    fn is_connected(&self) -> bool;

    /// Ask the station to associate again. Non-blocking.
    fn reconnect(&mut self) -> Result<()>;
}

/// Issue a reconnect and log, rather than return, any failure.
pub(crate) fn request_reconnect<L: WirelessLink + ?Sized>(link: &mut L) {
    if let Err(e) = link.reconnect() {
        log::warn!("WiFi reconnect request failed: {}", e);
    }
}

/// Poll `link` every `poll` until it is connected, re-issuing the connect
/// request every [`REASSOCIATE_EVERY_POLLS`] failed polls.
///
/// With `max_attempts = None` this blocks for as long as the network stays
/// unreachable. With `Some(n)` it gives up after `n` unsuccessful polls.
/// Returns the number of unsuccessful polls before the link came up.
pub fn wait_for_association<L, Z>(
    link: &mut L,
    delay: &mut Z,
    poll: Duration,
    max_attempts: Option<u32>,
) -> Result<u32>
where
    L: WirelessLink + ?Sized,
    Z: Delay + ?Sized,
{
    let mut attempts = 0u32;
    while !link.is_connected() {
        if max_attempts.is_some_and(|max| attempts >= max) {
            return Err(Error::WirelessAssociationPending { attempts });
        }
        if attempts > 0 && attempts % REASSOCIATE_EVERY_POLLS == 0 {
            log::info!("Still not associated after {} polls, reconnecting", attempts);
            request_reconnect(link);
        }
        log::info!("Connecting to WiFi...");
        delay.sleep(poll);
        attempts += 1;
    }
    Ok(attempts)
}
