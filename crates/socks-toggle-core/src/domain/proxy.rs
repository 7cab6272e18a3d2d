//! Substring markers used to interpret external tool output.
//!
//! Neither `networksetup` nor `curl` output is parsed structurally; a run is
//! judged purely on whether a known marker appears in the captured text.

/// Marker printed by `networksetup -getsocksfirewallproxy` for an enabled proxy.
pub const ENABLED_MARKER: &str = "Enabled: Yes";

/// Marker present in any HTTP status line returned by the probe.
pub const HTTP_RESPONSE_MARKER: &str = "HTTP/";

/// Markers `networksetup` prints when it rejects a request but still exits 0.
pub const NETWORKSETUP_ERROR_MARKERS: [&str; 2] =
    ["** Error", "is not a recognized network service"];

/// Returns `true` iff the status query output reports the proxy as enabled.
pub fn socks_proxy_enabled(status_output: &str) -> bool {
    status_output.contains(ENABLED_MARKER)
}

/// Returns `true` iff the probe output contains any HTTP response.
///
/// The status code is irrelevant: a `403` proves traffic got through just as
/// well as a `200`.
pub fn probe_reached_internet(probe_output: &str) -> bool {
    probe_output.contains(HTTP_RESPONSE_MARKER)
}

/// Returns the first `networksetup` error marker found in `output`, if any.
pub fn networksetup_error(output: &str) -> Option<&'static str> {
    NETWORKSETUP_ERROR_MARKERS
        .iter()
        .copied()
        .find(|marker| output.contains(marker))
}
