//! Turning SRV targets into dialable addresses.

/// Marks a target label whose leading part is a hex-encoded IPv4 address,
/// as in `c0000201.addr.dc1.consul`.
pub const ADDR_MARKER: &str = ".addr.";

/// Builds the address to dial for a SRV record's `target` and `port`.
///
/// A port of zero yields the bare target. Targets of the form
/// `<hex>.addr.<rest>` are decoded into a dotted-quad IPv4 address taken from
/// the first four decoded bytes. Anything that fails to decode is treated as
/// an ordinary host name; this function never fails.
pub fn decode_target(target: &str, port: u16) -> String {
    if port == 0 {
        return target.to_string();
    }

    let Some(index) = target.find(ADDR_MARKER) else {
        return format!("{target}:{port}");
    };

    match hex::decode(&target[..index]) {
        Ok(bytes) if bytes.len() >= 4 => {
            format!("{}.{}.{}.{}:{port}", bytes[0], bytes[1], bytes[2], bytes[3])
        }
        _ => format!("{target}:{port}"),
    }
}
