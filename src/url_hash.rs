// Query-string codec for the location hash ("#key=value&key2=value2").

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::collections::BTreeMap;

// Everything but the unreserved URI component characters.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

// Component set minus the characters kept literal for readable hashes.
const READABLE: &AsciiSet = &COMPONENT
    .remove(b'/')
    .remove(b':')
    .remove(b',')
    .remove(b'{')
    .remove(b'}');

fn decode(s: &str) -> String {
    percent_decode_str(s).decode_utf8_lossy().into_owned()
}

fn encode(s: &str, noencode: bool) -> String {
    let set = if noencode { READABLE } else { COMPONENT };
    utf8_percent_encode(s, set).to_string()
}

/// Parses a hash fragment into key/value pairs. A leading `#` or `?` is ignored.
/// Keys without `=` map to an empty value; later duplicates win. `+` stays a plus.
pub fn parse(hash: &str) -> BTreeMap<String, String> {
    hash.trim_start_matches(['#', '?'])
        .split('&')
        .filter(|part| !part.is_empty())
        .map(|part| match part.split_once('=') {
            Some((k, v)) => (decode(k), decode(v)),
            None => (decode(part), String::new()),
        })
        .filter(|(k, _)| !k.is_empty())
        .collect()
}

/// Serializes pairs as `k=v&k2=v2` in key order, percent-encoding keys and values.
/// With `noencode`, `/ : , { }` are left literal so `daterange=1800,1900` stays readable.
pub fn to_string(params: &BTreeMap<String, String>, noencode: bool) -> String {
    params
        .iter()
        .map(|(k, v)| format!("{}={}", encode(k, noencode), encode(v, noencode)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Same as [`to_string`] with a leading `#`.
pub fn to_hash(params: &BTreeMap<String, String>, noencode: bool) -> String {
    format!("#{}", to_string(params, noencode))
}
