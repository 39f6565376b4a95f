//! Runtime configuration for the `moltenflake` server binary.

use crate::layout::MAX_MACHINE_ID;
use anyhow::{Context, bail};
use clap::Parser;
use std::net::SocketAddr;

#[cfg(feature = "ip-fallback")]
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// Command line arguments, each with an environment variable fallback.
///
/// A `.env` file in the working directory is loaded before parsing.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "moltenflake",
    version,
    about = "An HTTP service handing out time-sortable 64-bit ids"
)]
pub struct CliArgs {
    /// Machine id encoded into every id, in `0..=2047`.
    ///
    /// It must be unique across every instance sharing an id namespace.
    /// With the `ip-fallback` feature it may be omitted, in which case it is
    /// derived from the host's private IP address.
    ///
    /// Environment variable: `MOLTENFLAKE_MACHINE_ID`
    #[arg(long, env = "MOLTENFLAKE_MACHINE_ID", allow_negative_numbers = true)]
    pub machine_id: Option<i64>,

    /// Address to listen on.
    ///
    /// Environment variable: `MOLTENFLAKE_SERVER_ADDR`
    #[arg(long, env = "MOLTENFLAKE_SERVER_ADDR", default_value_t = String::from("0.0.0.0:8080"))]
    pub server_addr: String,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub machine_id: u16,
    pub server_addr: SocketAddr,
}

impl TryFrom<CliArgs> for ServerConfig {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        let machine_id = match args.machine_id {
            Some(id) => id,
            None => fallback_machine_id()?,
        };

        if !(0..=i64::from(MAX_MACHINE_ID)).contains(&machine_id) {
            bail!(
                "MOLTENFLAKE_MACHINE_ID ({}) is out of range, it must be in the range 0..={}",
                machine_id,
                MAX_MACHINE_ID
            );
        }

        let server_addr = args
            .server_addr
            .parse::<SocketAddr>()
            .with_context(|| format!("invalid MOLTENFLAKE_SERVER_ADDR `{}`", args.server_addr))?;

        Ok(Self {
            machine_id: machine_id as u16,
            server_addr,
        })
    }
}

#[cfg(not(feature = "ip-fallback"))]
fn fallback_machine_id() -> anyhow::Result<i64> {
    bail!("MOLTENFLAKE_MACHINE_ID not provided and `ip-fallback` feature is disabled")
}

#[cfg(feature = "ip-fallback")]
fn fallback_machine_id() -> anyhow::Result<i64> {
    match machine_id_from_ip() {
        Some(id) => {
            tracing::info!(machine_id = id, "derived machine id from private ip address");
            Ok(i64::from(id))
        }
        None => bail!("MOLTENFLAKE_MACHINE_ID not provided and no private ip address was found"),
    }
}

/// Take the low 11 bits of the private IP address (v4 or v6).
#[cfg(feature = "ip-fallback")]
fn machine_id_from_ip() -> Option<u16> {
    if let Some(ipv4) = private_ipv4() {
        let octets = ipv4.octets();
        return Some(u16::from_be_bytes([octets[2], octets[3]]) & MAX_MACHINE_ID);
    }

    private_ipv6().map(|ipv6| ipv6.segments()[7] & MAX_MACHINE_ID)
}

#[cfg(feature = "ip-fallback")]
fn private_ipv4() -> Option<Ipv4Addr> {
    pnet_datalink::interfaces()
        .iter()
        .filter(|iface| iface.is_up() && !iface.is_loopback() && !iface.ips.is_empty())
        .flat_map(|iface| iface.ips.iter())
        .find_map(|network| match network.ip() {
            IpAddr::V4(ipv4) if ipv4.is_private() => Some(ipv4),
            _ => None,
        })
}

#[cfg(feature = "ip-fallback")]
fn private_ipv6() -> Option<Ipv6Addr> {
    pnet_datalink::interfaces()
        .iter()
        .filter(|iface| iface.is_up() && !iface.is_loopback() && !iface.ips.is_empty())
        .flat_map(|iface| iface.ips.iter())
        .find_map(|network| match network.ip() {
            IpAddr::V6(ipv6) if is_private_ipv6(&ipv6) => Some(ipv6),
            _ => None,
        })
}

#[cfg(feature = "ip-fallback")]
fn is_private_ipv6(ip: &Ipv6Addr) -> bool {
    // fc00::/7 (Unique Local Address)
    // fe80::/10 (Link-Local Address)
    (ip.segments()[0] & 0xfe00) == 0xfc00 || (ip.segments()[0] & 0xffc0) == 0xfe80
}
