pub(crate) trait StrExt {
    fn is_blank(&self) -> bool;

    /// Space-separated tokens, order preserved.
    fn tokens(&self) -> Vec<String>;
}

impl StrExt for str {
    fn is_blank(&self) -> bool {
        self.trim().is_empty()
    }

    fn tokens(&self) -> Vec<String> {
        self.split_ascii_whitespace().map(str::to_owned).collect()
    }
}

/// Returns the highest numeric suffix following `prefix` among `ids`.
pub(crate) fn max_suffix<'a>(prefix: &str, ids: impl IntoIterator<Item = &'a str>) -> usize {
    ids.into_iter()
        .filter_map(|id| id.strip_prefix(prefix)?.parse::<usize>().ok())
        .max()
        .unwrap_or_default()
}
