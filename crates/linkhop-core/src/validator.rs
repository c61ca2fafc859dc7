use crate::error::InvalidLinkError;
use crate::link::Destination;
use url::Url;

const DEFAULT_SCHEME_PREFIX: &str = "https://";
const ACCEPTED_SCHEME_PREFIXES: [&str; 2] = ["http://", "https://"];

/// Normalizes and validates a candidate destination.
///
/// Links without an explicit `http://` or `https://` prefix are upgraded to
/// `https://`. The normalized link is accepted only if it has a non-empty
/// network location and parses as an absolute URL with a host. The returned
/// destination is the normalized text itself, never a re-serialized URL.
///
/// Links containing control characters are rejected as well: the
/// destination ends up verbatim in a `Location` header.
pub fn validate_link(link: &str) -> Result<Destination, InvalidLinkError> {
    let normalized = if has_accepted_scheme(link) {
        link.to_string()
    } else {
        format!("{DEFAULT_SCHEME_PREFIX}{link}")
    };

    if normalized.chars().any(char::is_control) {
        return Err(InvalidLinkError::new(normalized));
    }

    if network_location(&normalized).is_none_or(str::is_empty) {
        return Err(InvalidLinkError::new(normalized));
    }

    match Url::parse(&normalized) {
        Ok(url) if url.host_str().is_some_and(|host| !host.is_empty()) => {
            Ok(Destination::new(normalized))
        }
        _ => Err(InvalidLinkError::new(normalized)),
    }
}

fn has_accepted_scheme(link: &str) -> bool {
    ACCEPTED_SCHEME_PREFIXES.iter().any(|prefix| {
        link.get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
    })
}

/// Returns the authority between `://` and the first `/`, `?` or `#`.
fn network_location(link: &str) -> Option<&str> {
    let (_, rest) = link.split_once("://")?;
    let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    Some(&rest[..end])
}
