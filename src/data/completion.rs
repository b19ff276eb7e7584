/// Food names starting with `prefix`, ignoring case, in list order.
///
/// The whole input is matched as one phrase, not word by word. A blank
/// prefix suggests nothing.
pub fn suggest<'a, S: AsRef<str>>(names: &'a [S], prefix: &str, limit: usize) -> Vec<&'a str> {
    let prefix = prefix.trim_start().to_lowercase();
    if prefix.is_empty() {
        return Vec::new();
    }
    names
        .iter()
        .map(|name| name.as_ref())
        .filter(|name| name.to_lowercase().starts_with(&prefix))
        .take(limit)
        .collect()
}
