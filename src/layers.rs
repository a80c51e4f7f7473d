//! Semantic labels derived from drawing layer names.
//!
//! Drawings usually encode the meaning of their lines in layer names such as
//! `A-WALL-EXT` or `0_DOOR`. A [`LayerClassifier`] normalizes these names, matches them
//! against an ordered list of rules, and decides which labels are kept.

use crate::utils::hashmap::HashSet;
use regex::{Regex, RegexBuilder};

/// Errors raised while compiling layer rules.
#[derive(thiserror::Error, Debug)]
pub enum LayerRuleError {
    /// The pattern of a rule is not a valid regular expression.
    #[error("invalid layer pattern {pattern:?}: {source}")]
    InvalidPattern {
        /// The rejected pattern.
        pattern: String,
        /// The underlying parse error.
        source: regex::Error,
    },
}

/// How layer names are cleaned up before being matched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LayerNaming {
    /// Characters removed from the name, anywhere they appear.
    pub strip_chars: Vec<char>,
    /// Whether the name is converted to uppercase.
    pub uppercase: bool,
    /// Prefixes removed from the start of the name, tried in order.
    pub remove_prefixes: Vec<String>,
}

impl LayerNaming {
    /// The normalized form of a layer name.
    ///
    /// # Example
    ///
    /// ```
    /// use planar_topology::layers::LayerNaming;
    ///
    /// let naming = LayerNaming {
    ///     strip_chars: vec!['-', ' '],
    ///     uppercase: true,
    ///     remove_prefixes: vec!["a".to_owned()],
    /// };
    /// assert_eq!(naming.normalize("a-wall ext"), "WALLEXT");
    /// ```
    pub fn normalize(&self, name: &str) -> String {
        let mut result: String = name
            .chars()
            .filter(|c| !self.strip_chars.contains(c))
            .collect();

        if self.uppercase {
            result = result.to_uppercase();
        }

        for prefix in &self.remove_prefixes {
            let prefix = if self.uppercase {
                prefix.to_uppercase()
            } else {
                prefix.clone()
            };

            if let Some(rest) = result.strip_prefix(prefix.as_str()) {
                result = rest.to_owned();
            }
        }

        result
    }
}

/// A case-insensitive pattern associated to a semantic label.
#[derive(Clone, Debug)]
pub struct SemanticRule {
    pattern: Regex,
    semantic: String,
}

impl SemanticRule {
    /// Compiles a rule. The pattern may match anywhere in the layer name.
    pub fn new(pattern: &str, semantic: impl Into<String>) -> Result<Self, LayerRuleError> {
        let pattern = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|source| LayerRuleError::InvalidPattern {
                pattern: pattern.to_owned(),
                source,
            })?;

        Ok(SemanticRule {
            pattern,
            semantic: semantic.into(),
        })
    }

    /// The label given to matching layers.
    pub fn semantic(&self) -> &str {
        &self.semantic
    }

    /// Does this rule match the given layer name?
    pub fn matches(&self, name: &str) -> bool {
        self.pattern.is_match(name)
    }
}

/// Maps layer names to semantic labels.
///
/// # Example
///
/// ```
/// use planar_topology::layers::{LayerClassifier, SemanticRule};
///
/// let classifier = LayerClassifier::new(vec![
///     SemanticRule::new("wall|parede", "WALL").unwrap(),
///     SemanticRule::new("door", "DOOR").unwrap(),
/// ])
/// .exclude(["DOOR"]);
///
/// assert_eq!(classifier.label("A-Wall-Ext"), Some("WALL"));
/// assert_eq!(classifier.label("A-DOOR"), None);
/// assert_eq!(classifier.semantic("A-DOOR"), Some("DOOR"));
/// assert_eq!(classifier.label("FURNITURE"), None);
/// assert!(classifier.keep(None));
/// ```
#[derive(Clone, Debug, Default)]
pub struct LayerClassifier {
    naming: LayerNaming,
    rules: Vec<SemanticRule>,
    include: HashSet<String>,
    exclude: HashSet<String>,
}

impl LayerClassifier {
    /// A classifier trying the given rules in order, without name normalization.
    pub fn new(rules: Vec<SemanticRule>) -> Self {
        LayerClassifier {
            rules,
            ..Default::default()
        }
    }

    /// Normalizes layer names before matching them.
    pub fn with_naming(mut self, naming: LayerNaming) -> Self {
        self.naming = naming;
        self
    }

    /// Only keeps the given labels. Unclassified layers are then dropped as well.
    pub fn include<S: Into<String>>(mut self, semantics: impl IntoIterator<Item = S>) -> Self {
        self.include.extend(semantics.into_iter().map(Into::into));
        self
    }

    /// Drops the given labels.
    pub fn exclude<S: Into<String>>(mut self, semantics: impl IntoIterator<Item = S>) -> Self {
        self.exclude.extend(semantics.into_iter().map(Into::into));
        self
    }

    /// The label of the first rule matching the normalized layer name.
    pub fn semantic(&self, layer: &str) -> Option<&str> {
        let name = self.naming.normalize(layer);
        self.rules
            .iter()
            .find(|rule| rule.matches(&name))
            .map(SemanticRule::semantic)
    }

    /// Whether segments with this label should be kept.
    pub fn keep(&self, semantic: Option<&str>) -> bool {
        match semantic {
            Some(s) if self.exclude.contains(s) => false,
            Some(s) => self.include.is_empty() || self.include.contains(s),
            None => self.include.is_empty(),
        }
    }

    /// The label of a layer, or `None` if it is unclassified or filtered out.
    ///
    /// Use [`LayerClassifier::keep`] to distinguish the two cases.
    pub fn label(&self, layer: &str) -> Option<&str> {
        self.semantic(layer).filter(|s| self.keep(Some(*s)))
    }
}
