use crate::quoting::{IdentifierQuoter, Quotable};

/// Builds the body of a `CREATE TABLE` statement, quoting every identifier with the
/// dialect's quoter.
pub struct DdlQueryBuilder<'q> {
    sql: String,
    identifier_quoter: &'q IdentifierQuoter,
}

impl<'a> DdlQueryBuilder<'a> {
    pub fn new(identifier_quoter: &'a IdentifierQuoter) -> Self {
        Self {
            sql: String::new(),
            identifier_quoter,
        }
    }

    pub fn create_table(&mut self, namespace: Option<&str>, table: &str) -> DdlTableBuilder<'a, '_> {
        self.sql.push_str("CREATE TABLE ");
        if let Some(namespace) = namespace {
            self.sql.push_str(&namespace.quote(self.identifier_quoter));
            self.sql.push('.');
        }
        self.sql.push_str(&table.quote(self.identifier_quoter));
        self.sql.push_str(" (");

        DdlTableBuilder {
            query_builder: self,
            has_first_line: false,
        }
    }

    pub fn build(mut self) -> String {
        self.sql.push_str("\n);");

        self.sql
    }
}

pub struct DdlTableBuilder<'q, 'b> {
    query_builder: &'b mut DdlQueryBuilder<'q>,
    has_first_line: bool,
}

impl<'a, 'q> DdlTableBuilder<'a, 'q> {
    /// Starts a column line. `data_type` is rendered as given, it is not an identifier.
    pub fn column<'b>(&'b mut self, name: &str, data_type: &str) -> DdlTableColumnBuilder<'b> {
        let name = self.query_builder.identifier_quoter.quote(name);
        self.start_new_line();
        self.query_builder
            .sql
            .push_str(&format!("    {} {}", name, data_type));

        DdlTableColumnBuilder {
            sql: &mut self.query_builder.sql,
        }
    }

    fn start_new_line(&mut self) {
        if self.has_first_line {
            self.query_builder.sql.push_str(",\n")
        } else {
            self.query_builder.sql.push('\n');
            self.has_first_line = true;
        }
    }
}

pub struct DdlTableColumnBuilder<'a> {
    sql: &'a mut String,
}

impl<'a> DdlTableColumnBuilder<'a> {
    /// Appends a default expression exactly as the database reported it.
    pub fn default_value(&mut self, expression: &str) -> &mut Self {
        self.sql.push_str(" DEFAULT ");
        self.sql.push_str(expression);

        self
    }

    pub fn not_null(&mut self) -> &mut Self {
        self.sql.push_str(" NOT NULL");

        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn builds_create_table_expression() {
        let quoter = IdentifierQuoter::empty();
        let mut builder = DdlQueryBuilder::new(&quoter);
        let mut table_builder = builder.create_table(Some("app"), "my_table");
        table_builder.column("id", "INT").not_null();
        table_builder.column("name", "VARCHAR(255)");
        let result = builder.build();

        assert_eq!(
            result,
            indoc! {r#"
        CREATE TABLE app.my_table (
            id INT NOT NULL,
            name VARCHAR(255)
        );"#}
        );
    }

    #[test]
    fn without_namespace() {
        let quoter = IdentifierQuoter::empty();
        let mut builder = DdlQueryBuilder::new(&quoter);
        let mut table_builder = builder.create_table(None, "my table");
        table_builder
            .column("created", "TIMESTAMP")
            .default_value("CURRENT_TIMESTAMP")
            .not_null();
        let result = builder.build();

        assert_eq!(
            result,
            indoc! {r#"
        CREATE TABLE "my table" (
            created TIMESTAMP DEFAULT CURRENT_TIMESTAMP NOT NULL
        );"#}
        );
    }
}
