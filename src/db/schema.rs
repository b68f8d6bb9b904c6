pub const SCHEMA_SQL: &str = include_str!("../../sql/schema.sql");

/// Splits a schema script into individual statements. SQLite executes one
/// statement per query, and the splitter must not break on semicolons inside
/// quoted literals (e.g. the 'General' default).
pub fn split_sql_statements(sql: &str) -> Vec<String> {
    let mut statements = Vec::new();
    let mut current = String::new();
    let mut in_single_quote = false;
    let mut in_double_quote = false;

    for ch in sql.chars() {
        match ch {
            '\'' if !in_double_quote => in_single_quote = !in_single_quote,
            '"' if !in_single_quote => in_double_quote = !in_double_quote,
            ';' if !in_single_quote && !in_double_quote => {
                let stmt = current.trim();
                if !stmt.is_empty() {
                    statements.push(stmt.to_string());
                }
                current.clear();
                continue;
            }
            _ => {}
        }
        current.push(ch);
    }

    let tail = current.trim();
    if !tail.is_empty() {
        statements.push(tail.to_string());
    }

    statements
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_top_level_semicolons() {
        let stmts = split_sql_statements("CREATE TABLE a (x INT);\nCREATE TABLE b (y INT);");
        assert_eq!(stmts.len(), 2);
        assert!(stmts[0].starts_with("CREATE TABLE a"));
        assert!(stmts[1].starts_with("CREATE TABLE b"));
    }

    #[test]
    fn ignores_semicolons_inside_quotes() {
        let stmts = split_sql_statements("INSERT INTO t VALUES ('a;b');SELECT 1");
        assert_eq!(stmts.len(), 2);
        assert_eq!(stmts[0], "INSERT INTO t VALUES ('a;b')");
    }

    #[test]
    fn embedded_schema_is_non_empty() {
        let stmts = split_sql_statements(SCHEMA_SQL);
        assert!(stmts.iter().any(|s| s.contains("module_progress")));
        assert!(stmts.iter().any(|s| s.contains("game_scores")));
    }
}
