mod catalog;
mod column;
mod foreign_key;
mod grouping;
mod index;
mod jdbc_type;
mod page;
mod partition;
mod primary_key;
mod show_type;
mod table;

pub use catalog::*;
pub use column::*;
pub use foreign_key::*;
pub use grouping::*;
pub use index::*;
pub use jdbc_type::*;
pub use page::*;
pub use partition::*;
pub use primary_key::*;
pub use show_type::*;
pub use table::*;

/// The namespace an object lives in: its schema, or its catalog for dialects without schemas.
///
/// Empty names count as absent.
pub fn namespace<'a>(schema: Option<&'a str>, catalog: Option<&'a str>) -> Option<&'a str> {
    schema
        .filter(|s| !s.is_empty())
        .or(catalog.filter(|c| !c.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::namespace;

    #[test]
    fn schema_falls_back_to_catalog() {
        assert_eq!(namespace(Some("app"), Some("db")), Some("app"));
        assert_eq!(namespace(None, Some("db")), Some("db"));
        assert_eq!(namespace(Some(""), Some("db")), Some("db"));
        assert_eq!(namespace(None, None), None);
    }
}
