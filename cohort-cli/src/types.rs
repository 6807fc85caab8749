//! Common types used across CLI modules

use std::time::Duration;

use clap::Args;
use serde_json::Value;

/// Collaboration given on the command line: a numeric ID or a name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollaborationRef {
    /// Broker ID
    Id(u64),
    /// Name, matched case-insensitively
    Name(String),
}

impl CollaborationRef {
    /// Parse a string into a CollaborationRef
    ///
    /// Attempts to parse as a numeric ID first, otherwise treats it as a name
    pub fn parse(input: &str) -> Self {
        match input.trim().parse::<u64>() {
            Ok(id) => CollaborationRef::Id(id),
            Err(_) => CollaborationRef::Name(input.trim().to_string()),
        }
    }
}

impl std::fmt::Display for CollaborationRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CollaborationRef::Id(id) => write!(f, "{}", id),
            CollaborationRef::Name(name) => write!(f, "{}", name),
        }
    }
}

impl From<&str> for CollaborationRef {
    fn from(s: &str) -> Self {
        CollaborationRef::parse(s)
    }
}

/// Options controlling how long to wait for a result
#[derive(Debug, Clone, Args)]
pub struct PollArgs {
    /// Maximum number of times the result is fetched
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_attempts: u32,

    /// Seconds to wait between fetches
    #[arg(long = "delay", default_value = "2", value_parser = parse_delay)]
    pub delay: Duration,
}

/// Parse a non-negative number of seconds
pub fn parse_delay(s: &str) -> anyhow::Result<Duration> {
    let seconds: f64 = s
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid delay `{}`: expected seconds", s))?;
    Duration::try_from_secs_f64(seconds)
        .map_err(|_| anyhow::anyhow!("delay must be a non-negative number of seconds"))
}

/// Parse a command-line value as JSON, falling back to a plain string
pub fn parse_json_value(s: &str) -> anyhow::Result<Value> {
    Ok(serde_json::from_str(s).unwrap_or_else(|_| Value::String(s.to_string())))
}

/// Parse a single key=value pair, the value as in [`parse_json_value`]
pub fn parse_key_val(s: &str) -> anyhow::Result<(String, Value)> {
    let pos = s
        .find('=')
        .ok_or_else(|| anyhow::anyhow!("invalid KEY=value: no `=` found in `{}`", s))?;
    Ok((s[..pos].to_string(), parse_json_value(&s[pos + 1..])?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_collaboration_ref_parse() {
        assert_eq!(CollaborationRef::parse("3"), CollaborationRef::Id(3));
        assert_eq!(
            CollaborationRef::parse(" studyathon "),
            CollaborationRef::Name("studyathon".to_string())
        );
        assert_eq!(CollaborationRef::from("-1").to_string(), "-1");
    }

    #[test]
    fn test_parse_delay() {
        assert_eq!(parse_delay("0").unwrap(), Duration::ZERO);
        assert_eq!(parse_delay("1.5").unwrap(), Duration::from_millis(1500));
        assert!(parse_delay("-2").is_err());
        assert!(parse_delay("soon").is_err());
    }

    #[test]
    fn test_parse_key_val() {
        assert_eq!(
            parse_key_val("time_column_name=Survival.time").unwrap(),
            ("time_column_name".to_string(), json!("Survival.time"))
        );
        assert_eq!(
            parse_key_val("organization_ids=[2,3,4]").unwrap(),
            ("organization_ids".to_string(), json!([2, 3, 4]))
        );
        assert_eq!(
            parse_key_val("bin_size=null").unwrap(),
            ("bin_size".to_string(), Value::Null)
        );
        assert_eq!(
            parse_key_val("expr=a=b").unwrap(),
            ("expr".to_string(), json!("a=b"))
        );
        assert!(parse_key_val("no-equals").is_err());
    }
}
