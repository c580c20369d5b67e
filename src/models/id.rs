//! Model identifier parsing.
//!
//! Identifiers look like `<provider>/<model-name>[:<variant>]`, e.g.
//! `meta-llama/llama-3.2-3b-instruct:free`. Nothing here validates an id;
//! parts that are not present simply come back as `None`.

/// Borrowed, parsed view of a model identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelId<'a> {
    raw: &'a str,
}

impl<'a> ModelId<'a> {
    /// Wrap a raw identifier
    pub fn parse(raw: &'a str) -> Self {
        Self { raw }
    }

    /// The identifier as given
    pub fn as_str(&self) -> &'a str {
        self.raw
    }

    /// Segment before the first `/`.
    ///
    /// # Examples
    /// ```
    /// use llm_models::models::ModelId;
    ///
    /// assert_eq!(ModelId::parse("openai/gpt-4").provider(), Some("openai"));
    /// assert_eq!(ModelId::parse("gpt-4").provider(), None);
    /// ```
    pub fn provider(&self) -> Option<&'a str> {
        self.raw.split_once('/').map(|(provider, _)| provider)
    }

    /// Second `/`-delimited segment with any `:variant` removed.
    ///
    /// # Examples
    /// ```
    /// use llm_models::models::ModelId;
    ///
    /// assert_eq!(ModelId::parse("openai/gpt-4:preview").name(), Some("gpt-4"));
    /// assert_eq!(ModelId::parse("gpt-4").name(), None);
    /// ```
    pub fn name(&self) -> Option<&'a str> {
        let (_, rest) = self.raw.split_once('/')?;
        let segment = rest.split('/').next().unwrap_or(rest);
        Some(segment.split(':').next().unwrap_or(segment))
    }

    /// Portion after the first `:` of the model-name segment
    pub fn variant(&self) -> Option<&'a str> {
        let (_, rest) = self.raw.split_once('/')?;
        let segment = rest.split('/').next().unwrap_or(rest);
        segment.split_once(':').map(|(_, variant)| variant)
    }

    /// Check whether the id marks a free-tier variant (`:free` anywhere)
    pub fn is_free(&self) -> bool {
        self.raw.contains(":free")
    }

    /// Identifier with everything from the first `:` removed
    pub fn without_suffix(&self) -> &'a str {
        self.raw.split(':').next().unwrap_or(self.raw)
    }
}

impl std::fmt::Display for ModelId<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.raw)
    }
}
