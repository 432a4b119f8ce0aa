use crate::connection::{ConnectableResource, Connection, QueryResult, ResultColumn, Row, SqlValue};
use crate::{DriverError, Result};

/// A checked-out connection with typed helpers on top of the raw [`Connection`].
///
/// Every error coming out of the connection is tagged with the SQL that produced it.
pub struct ConnectionWrapper {
    connection: Box<dyn Connection>,
}

impl ConnectionWrapper {
    pub async fn acquire(resource: &dyn ConnectableResource) -> Result<Self> {
        let connection = resource.acquire().await?;

        Ok(ConnectionWrapper { connection })
    }

    pub async fn execute_non_query(&mut self, sql: &str) -> Result<u64> {
        self.execute(sql, &[]).await
    }

    pub async fn execute(&mut self, sql: &str, params: &[SqlValue]) -> Result<u64> {
        tracing::debug!(sql, "executing statement");
        self.connection
            .execute(sql, params)
            .await
            .map_err(|e| e.with_query(sql))
    }

    pub async fn query(&mut self, sql: &str, params: &[SqlValue]) -> Result<QueryResult> {
        tracing::debug!(sql, "running query");
        self.connection
            .query(sql, params)
            .await
            .map_err(|e| e.with_query(sql))
    }

    pub async fn describe(&mut self, sql: &str) -> Result<Vec<ResultColumn>> {
        self.connection
            .describe(sql)
            .await
            .map_err(|e| e.with_query(sql))
    }

    pub async fn get_results<T: FromRow>(&mut self, sql: &str, params: &[SqlValue]) -> Result<Vec<T>> {
        let query_results = self.query(sql, params).await?;

        let mut output = Vec::with_capacity(query_results.rows.len());

        for row in query_results.rows.into_iter() {
            output.push(T::from_row(row)?);
        }

        Ok(output)
    }

    pub async fn get_result<T: FromRow>(&mut self, sql: &str, params: &[SqlValue]) -> Result<T> {
        let results = self.get_results(sql, params).await?;
        if results.len() != 1 {
            return Err(DriverError::InvalidNumberOfResults {
                actual: results.len(),
                expected: 1,
            });
        }

        let mut results = results.into_iter();
        results.next().ok_or(DriverError::InvalidNumberOfResults {
            actual: 0,
            expected: 1,
        })
    }

    pub async fn get_single_results<T: FromSqlValue>(&mut self, sql: &str, params: &[SqlValue]) -> Result<Vec<T>> {
        let r = self
            .get_results::<(T,)>(sql, params)
            .await?
            .into_iter()
            .map(|t| t.0)
            .collect();

        Ok(r)
    }

    pub async fn get_single_result<T: FromSqlValue>(&mut self, sql: &str, params: &[SqlValue]) -> Result<T> {
        let result = self.get_result::<(T,)>(sql, params).await?;
        Ok(result.0)
    }
}

pub trait FromRow: Sized {
    fn from_row(row: Row) -> Result<Self>;
}

impl<T1: FromSqlValue> FromRow for (T1,) {
    fn from_row(row: Row) -> Result<Self> {
        Ok((row.try_get(0)?,))
    }
}

/// Conversion from a single column value.
///
/// Catalog views disagree on how they report numbers and flags (Oracle hands back
/// `NUMBER` columns as decimals, MySQL reports `YES`/`NO`), so the conversions accept
/// every lossless representation.
pub trait FromSqlValue: Sized {
    fn from_sql_value(value: SqlValue, index: usize) -> Result<Self>;
}

fn unexpected(value: &SqlValue, index: usize, expected: &'static str) -> DriverError {
    DriverError::UnexpectedValue {
        index,
        expected,
        actual: value.kind().to_string(),
    }
}

impl FromSqlValue for String {
    fn from_sql_value(value: SqlValue, index: usize) -> Result<Self> {
        match value {
            SqlValue::Text(s) => Ok(s),
            SqlValue::Int(i) => Ok(i.to_string()),
            SqlValue::Float(f) => Ok(f.to_string()),
            SqlValue::Bool(b) => Ok(b.to_string()),
            other => Err(unexpected(&other, index, "text")),
        }
    }
}

impl FromSqlValue for i64 {
    fn from_sql_value(value: SqlValue, index: usize) -> Result<Self> {
        match value {
            SqlValue::Int(i) => Ok(i),
            SqlValue::Float(f) if f.fract() == 0.0 => Ok(f as i64),
            SqlValue::Text(ref s) => s.trim().parse().map_err(|_| unexpected(&value, index, "integer")),
            other => Err(unexpected(&other, index, "integer")),
        }
    }
}

impl FromSqlValue for i32 {
    fn from_sql_value(value: SqlValue, index: usize) -> Result<Self> {
        let kind = value.kind();
        let wide = i64::from_sql_value(value, index)?;
        i32::try_from(wide).map_err(|_| DriverError::UnexpectedValue {
            index,
            expected: "32 bit integer",
            actual: kind.to_string(),
        })
    }
}

impl FromSqlValue for bool {
    fn from_sql_value(value: SqlValue, index: usize) -> Result<Self> {
        match value {
            SqlValue::Bool(b) => Ok(b),
            SqlValue::Int(i) => Ok(i != 0),
            SqlValue::Text(ref s) => match s.trim().to_ascii_uppercase().as_str() {
                "YES" | "Y" | "TRUE" | "1" => Ok(true),
                "NO" | "N" | "FALSE" | "0" => Ok(false),
                _ => Err(unexpected(&value, index, "boolean")),
            },
            other => Err(unexpected(&other, index, "boolean")),
        }
    }
}

impl<T: FromSqlValue> FromSqlValue for Option<T> {
    fn from_sql_value(value: SqlValue, index: usize) -> Result<Self> {
        match value {
            SqlValue::Null => Ok(None),
            other => T::from_sql_value(other, index).map(Some),
        }
    }
}

impl Row {
    pub fn try_get<T: FromSqlValue>(&self, index: usize) -> Result<T> {
        let value = self
            .values
            .get(index)
            .cloned()
            .ok_or(DriverError::ColumnIndexOutOfRange(index))?;

        T::from_sql_value(value, index)
    }
}
