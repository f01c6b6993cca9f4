use regex::Regex;
use serde_json::Value;
use std::collections::HashSet;

/// Flags column names in leaked rows that look like credentials or personal
/// data, so the report can call out the worst of an exposure.
pub struct SensitiveFieldScanner {
    patterns: Vec<Regex>,
}

impl SensitiveFieldScanner {
    pub fn new() -> Self {
        let patterns = vec![
            Regex::new(r"(?i)password").unwrap(),
            Regex::new(r"(?i)secret").unwrap(),
            Regex::new(r"(?i)token").unwrap(),
            Regex::new(r"(?i)api[_-]?key").unwrap(),
            Regex::new(r"(?i)email").unwrap(),
            Regex::new(r"(?i)phone").unwrap(),
            Regex::new(r"(?i)cpf").unwrap(),
            Regex::new(r"(?i)document").unwrap(),
            Regex::new(r"(?i)birth").unwrap(),
            Regex::new(r"(?i)address").unwrap(),
            Regex::new(r"(?i)stripe").unwrap(),
            Regex::new(r"(?i)customer[_-]?id").unwrap(),
        ];

        Self { patterns }
    }

    /// Collects column paths across all rows and returns the ones matching a
    /// sensitive pattern, sorted for stable output.
    pub fn scan_rows(&self, rows: &[Value]) -> Vec<String> {
        let mut keys = HashSet::new();
        for row in rows {
            Self::walk_json(row, String::new(), &mut keys);
        }

        let mut found: Vec<String> = keys
            .into_iter()
            .filter(|key| self.patterns.iter().any(|pattern| pattern.is_match(key)))
            .collect();
        found.sort();
        found
    }

    fn walk_json(value: &Value, prefix: String, keys: &mut HashSet<String>) {
        match value {
            Value::Object(map) => {
                for (key, val) in map {
                    let path = if prefix.is_empty() {
                        key.clone()
                    } else {
                        format!("{}.{}", prefix, key)
                    };
                    keys.insert(path.clone());
                    Self::walk_json(val, path, keys);
                }
            }
            Value::Array(arr) => {
                if let Some(first) = arr.first() {
                    let array_path = format!("{}[]", prefix);
                    Self::walk_json(first, array_path, keys);
                }
            }
            _ => {}
        }
    }
}

impl Default for SensitiveFieldScanner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flags_credential_columns() {
        let scanner = SensitiveFieldScanner::new();
        let rows = vec![json!({
            "id": 1,
            "email": "user@example.com",
            "stripe_customer_id": "cus_123"
        })];

        let found = scanner.scan_rows(&rows);
        assert!(found.contains(&"email".to_string()));
        assert!(found.contains(&"stripe_customer_id".to_string()));
        assert!(!found.contains(&"id".to_string()));
    }

    #[test]
    fn test_walks_nested_objects() {
        let scanner = SensitiveFieldScanner::new();
        let rows = vec![json!({
            "profile": {
                "contact": {
                    "phone_number": "+55 11 99999-0000"
                }
            }
        })];

        let found = scanner.scan_rows(&rows);
        assert!(found.contains(&"profile.contact.phone_number".to_string()));
    }

    #[test]
    fn test_collects_across_rows() {
        let scanner = SensitiveFieldScanner::new();
        let rows = vec![
            json!({"id": 1}),
            json!({"id": 2, "birth_date": "1990-01-01"}),
        ];

        let found = scanner.scan_rows(&rows);
        assert_eq!(found, vec!["birth_date".to_string()]);
    }

    #[test]
    fn test_clean_rows_produce_nothing() {
        let scanner = SensitiveFieldScanner::new();
        let rows = vec![json!({"id": 1, "calories": 420, "name": "lunch"})];

        assert!(scanner.scan_rows(&rows).is_empty());
    }
}
