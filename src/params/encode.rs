use std::borrow::Cow;

use percent_encoding::AsciiSet;

/// The WHATWG query percent-encode set
/// (https://url.spec.whatwg.org/#query-percent-encode-set) plus the
/// characters that delimit query parameters.
///
/// Spaces are not in the set; they are written as `+` afterwards.
const QUERY_SET: &AsciiSet = &percent_encoding::CONTROLS
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'%')
    .add(b'+')
    .add(b'=')
    .add(b'&');

/// The `application/x-www-form-urlencoded` percent-encode set: everything
/// except ASCII alphanumerics and `*-._`.
const FORM_URLENCODED_SET: &AsciiSet = &percent_encoding::NON_ALPHANUMERIC
    .remove(b'*')
    .remove(b'-')
    .remove(b'.')
    .remove(b'_');

/// Percent-encodes one key or value.
///
/// In query mode spaces become `+`; in form mode they are `%20` like every
/// other reserved byte. Non-ASCII input is always percent-encoded.
pub fn encode(input: &str, use_form_encoding: bool) -> impl Iterator<Item = Cow<'_, str>> + '_ {
    let set = if use_form_encoding {
        FORM_URLENCODED_SET
    } else {
        QUERY_SET
    };
    percent_encoding::utf8_percent_encode(input, set).map(move |chunk| {
        if !use_form_encoding && chunk.contains(' ') {
            Cow::Owned(chunk.replace(' ', "+"))
        } else {
            Cow::Borrowed(chunk)
        }
    })
}
