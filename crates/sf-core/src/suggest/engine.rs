use super::domains::KNOWN_DOMAINS;

/// Maximum edit distance for a known domain to count as a typo correction.
const MAX_CORRECTION_DISTANCE: usize = 2;

/// Minimum typed domain length before typo correction kicks in. Shorter
/// fragments are still being typed and would match almost everything.
const MIN_CORRECTION_LEN: usize = 3;

/// Minimum typed domain length for prefix autocomplete (a bare trailing `@`
/// is a separate path that lists every known domain).
const MIN_AUTOCOMPLETE_LEN: usize = 2;

/// Suggests a corrected domain for a mistyped email address.
///
/// Returns `None` when the address does not split into exactly two parts on
/// `@`, when the domain is already a known provider, or when no known domain
/// is within edit distance [`MAX_CORRECTION_DISTANCE`]. The first match in
/// [`KNOWN_DOMAINS`] order wins.
pub fn suggest_corrected_domain(email: &str) -> Option<&'static str> {
    let (_, domain) = split_on_single_at(email)?;
    let domain = domain.to_lowercase();
    if domain.is_empty() {
        return None;
    }

    for known in KNOWN_DOMAINS {
        if domain == *known {
            // Already correct, never second-guess an exact match.
            return None;
        }
        if domain.len() >= MIN_CORRECTION_LEN
            && levenshtein(&domain, known) <= MAX_CORRECTION_DISTANCE
        {
            return Some(known);
        }
    }
    None
}

/// Prefix-completes the domain part of a partially typed email address.
///
/// Results are full addresses (`local@domain`) in [`KNOWN_DOMAINS`] order.
/// An input ending in a bare `@` returns the local part combined with every
/// known domain; otherwise the typed domain must be at least
/// [`MIN_AUTOCOMPLETE_LEN`] characters and matches case-insensitively by
/// prefix.
pub fn autocomplete_addresses(input: &str) -> Vec<String> {
    let Some((local, domain)) = split_on_single_at(input) else {
        return Vec::new();
    };

    // User just typed '@': offer every known provider.
    if domain.is_empty() {
        return KNOWN_DOMAINS
            .iter()
            .map(|known| format!("{local}@{known}"))
            .collect();
    }

    let typed = domain.to_lowercase();
    if typed.len() < MIN_AUTOCOMPLETE_LEN {
        return Vec::new();
    }

    KNOWN_DOMAINS
        .iter()
        .filter(|known| known.starts_with(&typed))
        .map(|known| format!("{local}@{known}"))
        .collect()
}

/// Splits `input` into (local, domain) iff it contains exactly one `@`.
fn split_on_single_at(input: &str) -> Option<(&str, &str)> {
    let mut parts = input.splitn(3, '@');
    let local = parts.next()?;
    let domain = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    Some((local, domain))
}

/// Levenshtein edit distance with unit costs, computed over chars.
fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = prev[j] + usize::from(ca != cb);
            curr[j + 1] = substitution.min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}
