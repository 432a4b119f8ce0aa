//! One module per supported dialect: its DDL generator, its catalog queries and the
//! factory that builds sessions for it.

pub mod hana;
pub mod mysql;
pub mod oracle;
