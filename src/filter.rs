use regex::Regex;
use thiserror::Error;

/// Errors raised while building a [`FilterConfig`].
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("You must provide either -p or -e flags. use --help for more info.")]
    MissingFilter,

    #[error("Could not validate the given regexp `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Which files qualify for deletion, and whether to descend into subdirectories.
#[derive(Debug, Clone)]
pub struct FilterConfig {
    /// `.{extension}`, dot included.
    suffix: Option<String>,
    pattern: Option<Regex>,
    recursive: bool,
}

impl FilterConfig {
    /// Builds a config from raw flag values. Empty strings count as unset.
    pub fn new(extension: &str, pattern: &str, recursive: bool) -> Result<Self, FilterError> {
        if extension.is_empty() && pattern.is_empty() {
            return Err(FilterError::MissingFilter);
        }

        let pattern = if pattern.is_empty() {
            None
        } else {
            let re = Regex::new(pattern).map_err(|source| FilterError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })?;
            Some(re)
        };
        let suffix = (!extension.is_empty()).then(|| format!(".{extension}"));

        Ok(Self {
            suffix,
            pattern,
            recursive,
        })
    }

    pub fn recursive(&self) -> bool {
        self.recursive
    }

    pub fn should_delete(&self, file_name: &str) -> bool {
        match (&self.suffix, &self.pattern) {
            (Some(_), Some(_)) => {
                self.matches_extension(file_name) && self.matches_pattern(file_name)
            }
            (Some(_), None) => self.matches_extension(file_name),
            (None, Some(_)) => self.matches_pattern(file_name),
            (None, None) => false,
        }
    }

    /// Case-sensitive suffix match against `.{extension}`.
    pub fn matches_extension(&self, file_name: &str) -> bool {
        match &self.suffix {
            Some(suffix) => file_name.ends_with(suffix.as_str()),
            None => false,
        }
    }

    /// Runs the pattern against the name cut at its first `.`.
    pub fn matches_pattern(&self, file_name: &str) -> bool {
        match &self.pattern {
            Some(re) => re.is_match(stem(file_name)),
            None => false,
        }
    }
}

/// Everything before the first `.`; the whole name when there is none.
pub fn stem(file_name: &str) -> &str {
    match file_name.find('.') {
        Some(idx) => &file_name[..idx],
        None => file_name,
    }
}
