use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::DriverError;

/// A database engine whose SQL syntax the crate knows how to speak.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    Mysql,
    Oracle,
    Hana,
}

impl Dialect {
    pub const ALL: [Dialect; 3] = [Dialect::Mysql, Dialect::Oracle, Dialect::Hana];

    pub fn name(&self) -> &'static str {
        match self {
            Dialect::Mysql => "mysql",
            Dialect::Oracle => "oracle",
            Dialect::Hana => "hana",
        }
    }

    /// Whether a backslash inside a string literal escapes the next character.
    pub fn backslash_escapes(&self) -> bool {
        matches!(self, Dialect::Mysql)
    }
}

impl Display for Dialect {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dialect {
    type Err = DriverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mysql" | "mysql5" | "mysql8" => Ok(Dialect::Mysql),
            "oracle" => Ok(Dialect::Oracle),
            "hana" => Ok(Dialect::Hana),
            _ => Err(DriverError::UnknownDialect(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_dialect_names() {
        assert_eq!("MySQL".parse::<Dialect>().unwrap(), Dialect::Mysql);
        assert_eq!("mysql5".parse::<Dialect>().unwrap(), Dialect::Mysql);
        assert_eq!(" oracle ".parse::<Dialect>().unwrap(), Dialect::Oracle);
        assert_eq!("HANA".parse::<Dialect>().unwrap(), Dialect::Hana);

        let err = "db2".parse::<Dialect>().unwrap_err();
        assert!(matches!(err, DriverError::UnknownDialect(name) if name == "db2"));
    }
}
