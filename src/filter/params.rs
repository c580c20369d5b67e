//! Filter parameters, parsed once from the request query.

use std::collections::HashSet;

/// Query parameter names understood by the pipeline.
pub mod keys {
    /// Drop `:free` variants when `"true"`
    pub const IGNORE_FREE: &str = "ignore_free";
    /// Comma-separated provider allow-list
    pub const PROVIDER: &str = "provider";
    /// Comma-separated model-name allow-list
    pub const MODEL: &str = "model";
    /// Minimum context length in tokens
    pub const MIN_CONTEXT: &str = "min_context";
    /// Modality substring
    pub const MODALITY: &str = "modality";
    /// Strip `:variant` suffixes from ids when `"true"`
    pub const STRIP_SUFFIX: &str = "strip_suffix";
}

/// Parsed filter and transform settings.
///
/// Every field at its default value means "not requested".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterParams {
    /// Drop records whose id contains `:free`
    pub ignore_free: bool,
    /// Allowed providers
    pub providers: Option<HashSet<String>>,
    /// Allowed model names (variant ignored)
    pub models: Option<HashSet<String>>,
    /// Minimum context length, always positive when set
    pub min_context: Option<u64>,
    /// Required modality substring, never empty when set
    pub modality: Option<String>,
    /// Replace ids with the portion before the first `:`
    pub strip_suffix: bool,
}

impl FilterParams {
    /// Parameters with every stage disabled
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from raw query pairs.
    ///
    /// The first occurrence of a key wins and unknown keys are ignored.
    /// Malformed values disable their stage instead of failing.
    pub fn from_query_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut raw = RawParams::default();

        for (key, value) in pairs {
            let slot = match key.as_ref() {
                keys::IGNORE_FREE => &mut raw.ignore_free,
                keys::PROVIDER => &mut raw.provider,
                keys::MODEL => &mut raw.model,
                keys::MIN_CONTEXT => &mut raw.min_context,
                keys::MODALITY => &mut raw.modality,
                keys::STRIP_SUFFIX => &mut raw.strip_suffix,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.as_ref().to_string());
            }
        }

        raw.into_params()
    }

    /// Enable the free-variant filter
    pub fn with_ignore_free(mut self) -> Self {
        self.ignore_free = true;
        self
    }

    /// Restrict to the given providers
    pub fn with_providers<I, S>(mut self, providers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.providers = Some(providers.into_iter().map(Into::into).collect());
        self
    }

    /// Restrict to the given model names
    pub fn with_models<I, S>(mut self, models: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.models = Some(models.into_iter().map(Into::into).collect());
        self
    }

    /// Require at least `min_context` tokens; zero disables the filter
    pub fn with_min_context(mut self, min_context: u64) -> Self {
        self.min_context = (min_context > 0).then_some(min_context);
        self
    }

    /// Require a modality substring; empty disables the filter
    pub fn with_modality(mut self, modality: impl Into<String>) -> Self {
        let modality = modality.into();
        self.modality = (!modality.is_empty()).then_some(modality);
        self
    }

    /// Enable the suffix-stripping transform
    pub fn with_strip_suffix(mut self) -> Self {
        self.strip_suffix = true;
        self
    }

    /// Check whether no stage is active
    pub fn is_noop(&self) -> bool {
        *self == Self::default()
    }
}

/// Query values before interpretation, one slot per key.
#[derive(Default)]
struct RawParams {
    ignore_free: Option<String>,
    provider: Option<String>,
    model: Option<String>,
    min_context: Option<String>,
    modality: Option<String>,
    strip_suffix: Option<String>,
}

impl RawParams {
    fn into_params(self) -> FilterParams {
        FilterParams {
            ignore_free: is_true(self.ignore_free.as_deref()),
            providers: self.provider.as_deref().and_then(parse_list),
            models: self.model.as_deref().and_then(parse_list),
            min_context: self
                .min_context
                .as_deref()
                .and_then(parse_leading_int)
                .filter(|n| *n > 0)
                .and_then(|n| u64::try_from(n).ok()),
            modality: self.modality.filter(|m| !m.is_empty()),
            strip_suffix: is_true(self.strip_suffix.as_deref()),
        }
    }
}

/// Only the exact string `"true"` enables a flag
fn is_true(value: Option<&str>) -> bool {
    value == Some("true")
}

/// Split a non-empty comma list into a set, discarding empty entries
fn parse_list(value: &str) -> Option<HashSet<String>> {
    if value.is_empty() {
        return None;
    }
    Some(
        value
            .split(',')
            .filter(|entry| !entry.is_empty())
            .map(str::to_string)
            .collect(),
    )
}

/// Lenient integer parse: leading whitespace, optional sign, then the
/// leading run of digits. A `0x`/`0X` prefix switches to hexadecimal.
/// Trailing garbage is ignored and overflow saturates.
///
/// Returns `None` when no digit follows the optional sign and prefix.
pub(crate) fn parse_leading_int(value: &str) -> Option<i128> {
    let trimmed = value.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let (radix, digits) = match rest.get(..2) {
        Some("0x" | "0X") => (16, &rest[2..]),
        _ => (10, rest),
    };

    let end = digits
        .find(|c: char| !c.is_digit(radix))
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let magnitude = digits[..end]
        .chars()
        .filter_map(|c| c.to_digit(radix))
        .fold(0i128, |acc, d| {
            acc.saturating_mul(i128::from(radix))
                .saturating_add(i128::from(d))
        });
    let magnitude = magnitude.min(i128::from(u64::MAX));

    Some(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(pairs: &[(&str, &str)]) -> FilterParams {
        FilterParams::from_query_pairs(pairs.iter().copied())
    }

    fn set(items: &[&str]) -> HashSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_query_is_noop() {
        let params = parse(&[]);
        assert!(params.is_noop());
        assert_eq!(params, FilterParams::new());
    }

    #[test]
    fn test_flags_require_exact_true() {
        assert!(parse(&[("ignore_free", "true")]).ignore_free);
        assert!(!parse(&[("ignore_free", "TRUE")]).ignore_free);
        assert!(!parse(&[("ignore_free", "1")]).ignore_free);
        assert!(!parse(&[("ignore_free", "")]).ignore_free);
        assert!(parse(&[("strip_suffix", "true")]).strip_suffix);
        assert!(!parse(&[("strip_suffix", "yes")]).strip_suffix);
    }

    #[test]
    fn test_lists_split_on_comma() {
        let params = parse(&[("provider", "openai,anthropic"), ("model", "gpt-4")]);
        assert_eq!(params.providers, Some(set(&["openai", "anthropic"])));
        assert_eq!(params.models, Some(set(&["gpt-4"])));
    }

    #[test]
    fn test_empty_list_disables_stage() {
        let params = parse(&[("provider", ""), ("model", "")]);
        assert_eq!(params.providers, None);
        assert_eq!(params.models, None);
    }

    #[test]
    fn test_list_discards_empty_entries() {
        let params = parse(&[("provider", "openai,,")]);
        assert_eq!(params.providers, Some(set(&["openai"])));

        // Still active, but nothing can match.
        let params = parse(&[("provider", ",")]);
        assert_eq!(params.providers, Some(HashSet::new()));
    }

    #[test]
    fn test_min_context_parsing() {
        assert_eq!(parse(&[("min_context", "8000")]).min_context, Some(8000));
        assert_eq!(parse(&[("min_context", "8000abc")]).min_context, Some(8000));
        assert_eq!(parse(&[("min_context", "  42")]).min_context, Some(42));
        assert_eq!(parse(&[("min_context", "+7")]).min_context, Some(7));
        assert_eq!(parse(&[("min_context", "3.9")]).min_context, Some(3));
        assert_eq!(parse(&[("min_context", "abc")]).min_context, None);
        assert_eq!(parse(&[("min_context", "0")]).min_context, None);
        assert_eq!(parse(&[("min_context", "-5")]).min_context, None);
        assert_eq!(parse(&[("min_context", "")]).min_context, None);
    }

    #[test]
    fn test_min_context_saturates() {
        let params = parse(&[("min_context", "99999999999999999999999999")]);
        assert_eq!(params.min_context, Some(u64::MAX));
    }

    #[test]
    fn test_modality_must_be_non_empty() {
        assert_eq!(
            parse(&[("modality", "text")]).modality.as_deref(),
            Some("text")
        );
        assert_eq!(parse(&[("modality", "")]).modality, None);
    }

    #[test]
    fn test_first_occurrence_wins() {
        let params = parse(&[("provider", "openai"), ("provider", "anthropic")]);
        assert_eq!(params.providers, Some(set(&["openai"])));
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let params = parse(&[("page", "2"), ("ignore_free", "true")]);
        assert_eq!(params, FilterParams::new().with_ignore_free());
    }

    #[test]
    fn test_builders() {
        let params = FilterParams::new()
            .with_providers(["openai"])
            .with_models(vec!["gpt-4".to_string()])
            .with_min_context(0)
            .with_modality("")
            .with_strip_suffix();

        assert_eq!(params.providers, Some(set(&["openai"])));
        assert_eq!(params.models, Some(set(&["gpt-4"])));
        assert_eq!(params.min_context, None);
        assert_eq!(params.modality, None);
        assert!(params.strip_suffix);
        assert!(!params.is_noop());
    }

    #[test]
    fn test_parse_leading_int() {
        assert_eq!(parse_leading_int("12"), Some(12));
        assert_eq!(parse_leading_int("-12x"), Some(-12));
        assert_eq!(parse_leading_int("-"), None);
        assert_eq!(parse_leading_int("x12"), None);
    }

    #[test]
    fn test_parse_leading_int_hex_prefix() {
        assert_eq!(parse_leading_int("0x1F40"), Some(8000));
        assert_eq!(parse_leading_int("0X1f40zz"), Some(8000));
        assert_eq!(parse_leading_int("-0x10"), Some(-16));
        assert_eq!(parse_leading_int("0x"), None);
        assert_eq!(parse_leading_int("0xg"), None);
        assert_eq!(parse(&[("min_context", "0x1F40")]).min_context, Some(8000));
    }
}
