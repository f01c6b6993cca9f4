use anyhow::{Result, bail};

pub struct TableListParser;

impl TableListParser {
    /// Parses a comma-separated table list, e.g. `chat_messages,user_streak`.
    pub fn parse(input: &str) -> Result<Vec<String>> {
        let mut tables = Vec::new();

        for part in input.split(',') {
            let trimmed = part.trim();
            if trimmed.is_empty() {
                continue;
            }

            Self::validate(trimmed)?;
            tables.push(trimmed.to_string());
        }

        if tables.is_empty() {
            bail!("No valid table names found in input");
        }

        Ok(tables)
    }

    fn validate(name: &str) -> Result<()> {
        let Some(first) = name.chars().next() else {
            bail!("Empty table name");
        };

        if !(first.is_ascii_lowercase() || first == '_') {
            bail!(
                "Invalid table name: '{}'. Names must start with a lowercase letter or '_'",
                name
            );
        }

        if let Some(bad) = name
            .chars()
            .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_'))
        {
            bail!(
                "Invalid character '{}' in table name: '{}'. Allowed: a-z, 0-9, '_'",
                bad,
                name
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_table() {
        let tables = TableListParser::parse("chat_messages").unwrap();
        assert_eq!(tables, vec!["chat_messages".to_string()]);
    }

    #[test]
    fn test_parse_multiple_tables() {
        let input = "chat_messages, consumed_foods,daily_consumption";
        let tables = TableListParser::parse(input).unwrap();
        assert_eq!(tables.len(), 3);
        assert_eq!(tables[2], "daily_consumption");
    }

    #[test]
    fn test_empty_segments_are_skipped() {
        let tables = TableListParser::parse("user_streak, ,").unwrap();
        assert_eq!(tables, vec!["user_streak".to_string()]);
    }

    #[test]
    fn test_uppercase_is_rejected() {
        let result = TableListParser::parse("Profiles");
        assert!(result.is_err());
    }

    #[test]
    fn test_path_characters_are_rejected() {
        let result = TableListParser::parse("meals/../secrets");
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_input_is_rejected() {
        let result = TableListParser::parse(" , ");
        assert!(result.is_err());
    }
}
