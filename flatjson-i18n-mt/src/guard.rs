/// Token Guard for protecting format placeholders during machine translation
///
/// Format placeholders such as `%s` or `%1$d` look like ordinary text to a translation
/// engine, which may translate, reorder or split them. Before translation each placeholder
/// is wrapped in a marker tag the engine keeps verbatim; after translation the tags are
/// removed again and whitespace is normalized.
///
/// Format: ` <marker> %token </marker> ` where the marker defaults to `keep`
/// Example: `"%1$s items left"` → `"<keep> %1$s </keep>  items left"`
use crate::error::{MtError, MtResult};
use regex::Regex;

/// Marker tag used when none is configured
pub const DEFAULT_MARKER: &str = "keep";

/// Wraps and unwraps placeholder tokens with a configurable marker tag
#[derive(Debug, Clone)]
pub struct TokenGuard {
    marker: String,
    placeholder: Regex,
    before_open: Regex,
    after_close: Regex,
    tag: Regex,
    whitespace: Regex,
}

impl TokenGuard {
    /// Create a guard using `marker` as the tag name
    ///
    /// # Arguments
    /// * `marker` - Tag name, e.g. `keep` for `<keep>…</keep>`
    ///
    /// # Returns
    /// * `Ok(TokenGuard)` - Ready to guard and unguard
    /// * `Err(MtError::ConfigError)` - If the marker is empty or contains characters other
    ///   than ASCII alphanumerics, `-` and `_`
    pub fn new(marker: &str) -> MtResult<Self> {
        validate_marker(marker)?;
        let escaped = regex::escape(marker);

        Ok(Self {
            marker: marker.to_string(),
            placeholder: compile(r"(?:^|\s)%\S*")?,
            before_open: compile(&format!(r"(\S)<{}>", escaped))?,
            after_close: compile(&format!(r"</{}>(\S)", escaped))?,
            tag: compile(&format!(r"</?{}>", escaped))?,
            whitespace: compile(r"\s+")?,
        })
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Wrap every placeholder token in marker tags
    ///
    /// A placeholder is a whitespace-delimited token starting with `%`, either at the very
    /// start of the text or preceded by whitespace. The whitespace character in front of a
    /// token is absorbed into the replacement. The result is trimmed.
    ///
    /// # Example
    /// ```
    /// use flatjson_i18n_mt::TokenGuard;
    ///
    /// let guard = TokenGuard::new("keep").unwrap();
    /// assert_eq!(guard.guard("Hello %s"), "Hello <keep> %s </keep>");
    /// assert_eq!(guard.guard("100% done"), "100% done");
    /// ```
    pub fn guard(&self, text: &str) -> String {
        let open = format!("<{}>", self.marker);
        let close = format!("</{}>", self.marker);
        self.placeholder
            .replace_all(text, |caps: &regex::Captures| {
                format!(" {} {} {} ", open, caps[0].trim(), close)
            })
            .trim()
            .to_string()
    }

    /// Remove marker tags from translated text and normalize whitespace
    ///
    /// Steps, in order:
    /// 1. Put a space between a non-space character and an opening tag
    /// 2. Put a space between a closing tag and a non-space character
    /// 3. Drop the tags
    /// 4. Collapse whitespace runs into one space and trim
    ///
    /// Spacing must be restored before the tags go, otherwise a placeholder the engine
    /// glued to a tag ends up glued to the neighbouring word.
    ///
    /// # Example
    /// ```
    /// use flatjson_i18n_mt::TokenGuard;
    ///
    /// let guard = TokenGuard::new("keep").unwrap();
    /// assert_eq!(guard.unguard("残り<keep>%d</keep>個"), "残り %d 個");
    /// ```
    pub fn unguard(&self, text: &str) -> String {
        let open_replacement = format!("${{1}} <{}>", self.marker);
        let close_replacement = format!("</{}> ${{1}}", self.marker);

        let spaced = self
            .before_open
            .replace_all(text, open_replacement.as_str());
        let spaced = self
            .after_close
            .replace_all(&spaced, close_replacement.as_str());
        let untagged = self.tag.replace_all(&spaced, "");
        self.whitespace
            .replace_all(&untagged, " ")
            .trim()
            .to_string()
    }
}

fn validate_marker(marker: &str) -> MtResult<()> {
    if marker.is_empty() {
        return Err(MtError::ConfigError("Marker tag is empty".to_string()));
    }
    if !marker
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(MtError::ConfigError(format!(
            "Invalid characters in marker tag: {}",
            marker
        )));
    }
    Ok(())
}

fn compile(pattern: &str) -> MtResult<Regex> {
    Regex::new(pattern)
        .map_err(|e| MtError::ConfigError(format!("Invalid pattern '{}': {}", pattern, e)))
}
