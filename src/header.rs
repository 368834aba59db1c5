use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::evaluate::RoutingParams;

/// Metadata key carrying the routing header.
pub const REQUEST_PARAMS_HEADER: &str = "x-goog-request-params";

/// Everything outside the RFC 3986 unreserved set (`ALPHA / DIGIT / "-" / "." / "_" / "~"`).
const UNRESERVED: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Serialize routing params into the header value `k1=v1&k2=v2`.
///
/// Keys and values are percent-encoded as RFC 6570 form-style expansion does it: only
/// unreserved characters pass through, so `/` becomes `%2F`, `&` becomes `%26` and a space
/// becomes `%20`. Pairs are emitted in the order of `params`. Returns `None` when there is
/// nothing to send, in which case no header should be attached.
pub fn assemble(params: &RoutingParams) -> Option<String> {
    if params.is_empty() {
        return None;
    }

    let mut header = String::new();
    for (i, entry) in params.iter().enumerate() {
        if i > 0 {
            header.push('&');
        }
        header.extend(utf8_percent_encode(&entry.key, UNRESERVED));
        header.push('=');
        header.extend(utf8_percent_encode(&entry.value, UNRESERVED));
    }

    Some(header)
}
