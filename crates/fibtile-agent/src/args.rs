use std::collections::BTreeMap;

/// Free-form agent properties parsed from `key=value` tokens.
///
/// Tokens are separated by whitespace. Everything before the first `=` is the
/// key and everything after it is the value; a token without `=` uses the whole
/// token as both. Later tokens override earlier ones.
///
/// # Example
///
/// ```
/// use fibtile_agent::AgentArgs;
///
/// let args = AgentArgs::parse("name=evil role=environment", "seed=7 name=adversary");
/// assert_eq!(args.name(), "adversary");
/// assert_eq!(args.role(), "environment");
/// assert_eq!(args.get("seed"), Some("7"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgentArgs {
    properties: BTreeMap<String, String>,
}

impl AgentArgs {
    /// Parses `defaults` and then `args`, on top of `name=unknown role=unknown`.
    #[must_use]
    pub fn parse(defaults: &str, args: &str) -> Self {
        let mut this = Self::default();
        for token in ["name=unknown role=unknown", defaults, args]
            .into_iter()
            .flat_map(str::split_whitespace)
        {
            this.insert_token(token);
        }
        this
    }

    fn insert_token(&mut self, token: &str) {
        let (key, value) = token.split_once('=').unwrap_or((token, token));
        self.properties.insert(key.to_owned(), value.to_owned());
    }

    /// Stores a single `key=value` message, replacing any previous value.
    pub fn notify(&mut self, message: &str) {
        self.insert_token(message.trim());
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.get("name").unwrap_or("unknown")
    }

    #[must_use]
    pub fn role(&self) -> &str {
        self.get("role").unwrap_or("unknown")
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.properties
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_unknown() {
        let args = AgentArgs::parse("", "");
        assert_eq!(args.name(), "unknown");
        assert_eq!(args.role(), "unknown");
        assert_eq!(args.iter().count(), 2);
    }

    #[test]
    fn test_later_tokens_override() {
        let args = AgentArgs::parse("name=player role=player", "alpha=0.1   alpha=0.2\tseed=3");
        assert_eq!(args.name(), "player");
        assert_eq!(args.get("alpha"), Some("0.2"));
        assert_eq!(args.get("seed"), Some("3"));
    }

    #[test]
    fn test_value_keeps_later_equals_signs() {
        let args = AgentArgs::parse("", "load=a=b.bin");
        assert_eq!(args.get("load"), Some("a=b.bin"));
    }

    #[test]
    fn test_token_without_equals() {
        let args = AgentArgs::parse("", "verbose");
        assert_eq!(args.get("verbose"), Some("verbose"));
    }

    #[test]
    fn test_unknown_keys_are_kept() {
        let args = AgentArgs::parse("", "color=red");
        assert!(args.iter().any(|(k, v)| k == "color" && v == "red"));
    }

    #[test]
    fn test_notify_overrides() {
        let mut args = AgentArgs::parse("name=evil", "");
        args.notify("name=adversary");
        args.notify(" mode=fast ");
        assert_eq!(args.name(), "adversary");
        assert_eq!(args.get("mode"), Some("fast"));
    }
}
