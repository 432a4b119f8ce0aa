/// Splits a SQL text into its statements on `;`.
///
/// Separators inside string literals, quoted identifiers and comments are ignored. With
/// `backslash_escapes` a backslash inside a string literal escapes the next character, as
/// MySQL reads literals by default. Returned statements are trimmed and never include the
/// terminating `;`.
pub fn split_statements(text: &str, backslash_escapes: bool) -> Vec<String> {
    let mut output = Vec::new();
    let mut current = String::new();
    let mut state = SplitState::Normal;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match state {
            SplitState::Normal => match c {
                ';' => {
                    push_statement(&mut output, &current);
                    current.clear();
                    continue;
                }
                '\'' | '"' | '`' => state = SplitState::Quoted(c),
                '-' if chars.peek() == Some(&'-') => state = SplitState::LineComment,
                '/' if chars.peek() == Some(&'*') => {
                    current.push(c);
                    if let Some(star) = chars.next() {
                        current.push(star);
                    }
                    state = SplitState::BlockComment;
                    continue;
                }
                _ => {}
            },
            SplitState::Quoted(quote) => {
                if c == '\\' && backslash_escapes && quote != '`' {
                    current.push(c);
                    if let Some(escaped) = chars.next() {
                        current.push(escaped);
                    }
                    continue;
                }
                if c == quote {
                    // a doubled quote is an escaped quote and keeps us inside the literal
                    if chars.peek() == Some(&quote) {
                        current.push(c);
                        if let Some(next) = chars.next() {
                            current.push(next);
                        }
                        continue;
                    }
                    state = SplitState::Normal;
                }
            }
            SplitState::LineComment => {
                if c == '\n' {
                    state = SplitState::Normal;
                }
            }
            SplitState::BlockComment => {
                if c == '*' && chars.peek() == Some(&'/') {
                    current.push(c);
                    if let Some(slash) = chars.next() {
                        current.push(slash);
                    }
                    state = SplitState::Normal;
                    continue;
                }
            }
        }

        current.push(c);
    }

    push_statement(&mut output, &current);

    output
}

fn push_statement(output: &mut Vec<String>, statement: &str) {
    let trimmed = statement.trim();
    if !trimmed.is_empty() && !is_only_comments(trimmed) {
        output.push(trimmed.to_string());
    }
}

fn is_only_comments(statement: &str) -> bool {
    skip_leading_comments(statement).is_empty()
}

/// The statement from its first token on. An unterminated comment swallows the rest.
fn skip_leading_comments(mut statement: &str) -> &str {
    loop {
        statement = statement.trim_start();

        if let Some(rest) = statement.strip_prefix("--").or_else(|| statement.strip_prefix('#')) {
            statement = rest.split_once('\n').map(|(_, r)| r).unwrap_or_default();
        } else if let Some(rest) = statement.strip_prefix("/*") {
            statement = rest.split_once("*/").map(|(_, r)| r).unwrap_or_default();
        } else {
            return statement;
        }
    }
}

/// Returns true if the statement produces a result set rather than an update count.
pub fn is_query(statement: &str) -> bool {
    let first_word = skip_leading_comments(statement)
        .split(|c: char| c.is_whitespace() || c == '(')
        .find(|w| !w.is_empty())
        .unwrap_or_default()
        .to_ascii_uppercase();

    matches!(
        first_word.as_str(),
        "SELECT" | "WITH" | "SHOW" | "DESC" | "DESCRIBE" | "EXPLAIN" | "VALUES"
    )
}

#[derive(Debug, Eq, PartialEq, Copy, Clone)]
enum SplitState {
    Normal,
    Quoted(char),
    LineComment,
    BlockComment,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_semicolons() {
        let statements = split_statements("create table a(id int);\ninsert into a values (1);\n\n", false);
        assert_eq!(
            statements,
            vec!["create table a(id int)", "insert into a values (1)"]
        );
    }

    #[test]
    fn ignores_separators_inside_literals_and_comments() {
        let statements = split_statements(
            "insert into t values ('a;b', 'it''s;'); -- trailing; comment\nselect `x;y` from t /* ; */ where 1 = 1",
            false,
        );
        assert_eq!(
            statements,
            vec![
                "insert into t values ('a;b', 'it''s;')",
                "-- trailing; comment\nselect `x;y` from t /* ; */ where 1 = 1",
            ]
        );
    }

    #[test]
    fn last_statement_without_terminator_is_kept() {
        assert_eq!(split_statements("select 1", false), vec!["select 1"]);
        assert!(split_statements(" ; ;\n", false).is_empty());
        assert!(split_statements("-- nothing here", false).is_empty());
        assert_eq!(
            split_statements("select 1; /* done; really */\n", false),
            vec!["select 1"]
        );
    }

    #[test]
    fn backslash_escapes_keep_literals_together() {
        let text = r"insert into t values ('it\'s; fine'); select 1";

        assert_eq!(
            split_statements(text, true),
            vec![r"insert into t values ('it\'s; fine')", "select 1"]
        );

        // Without escapes the backslash is an ordinary character.
        assert_eq!(
            split_statements(r"select 'C:\'; select 2", false),
            vec![r"select 'C:\'", "select 2"]
        );
    }

    #[test]
    fn detects_queries() {
        assert!(is_query("select * from t"));
        assert!(is_query("  WITH x AS (select 1) select * from x"));
        assert!(is_query("-- comment\nSHOW CREATE TABLE t"));
        assert!(is_query("(select 1) union (select 2)"));
        assert!(is_query("/* report */ select * from users"));
        assert!(is_query("/* a */ -- b\n/* c */ select 1"));
        assert!(!is_query("/* report */ delete from users"));
        assert!(!is_query("update t set a = 1"));
        assert!(!is_query("create table t (id int)"));
    }
}
